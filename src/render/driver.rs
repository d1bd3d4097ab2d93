//! Crossterm terminal backend.
//!
//! [`TerminalSurface`] implements [`Surface`] on a grid of character cells, one
//! surface unit per cell. Drawing happens in an in-memory [`CellBuffer`];
//! `present` diffs it against the previous frame and writes only the changed
//! cells through a buffered stdout writer. [`TerminalEvents`] is the matching
//! [`EventSource`].

use std::io::{self, BufWriter, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor, event as ct_event, execute, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::css::color::Color;
use crate::css::styles::Font;
use crate::event::{Event, EventSource};
use crate::geometry::{Point, Rect, Size};
use crate::image::Image;
use crate::render::surface::Surface;

// ---------------------------------------------------------------------------
// Cell buffer
// ---------------------------------------------------------------------------

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self { ch: ' ', fg: Color::WHITE, bg }
    }
}

/// A positioned cell that differs from the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

/// Row-major grid of cells with clipped drawing primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct CellBuffer {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl CellBuffer {
    pub fn new(size: Size) -> Self {
        let width = size.width.max(0);
        let height = size.height.max(0);
        Self { width, height, cells: vec![Cell::blank(Color::BLACK); (width * height) as usize] }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        let i = self.index(x, y)?;
        Some(&mut self.cells[i])
    }

    pub fn clear(&mut self, bg: Color) {
        self.cells.fill(Cell::blank(bg));
    }

    /// Paint the background of every cell in `rect`.
    pub fn fill(&mut self, rect: Rect, bg: Color) {
        if bg.a == 0 {
            return;
        }
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(cell) = self.cell_mut(x, y) {
                    *cell = Cell::blank(bg);
                }
            }
        }
    }

    /// Paint the outer `thickness` cells of `rect`.
    pub fn outline(&mut self, rect: Rect, bg: Color, thickness: i32) {
        if thickness <= 0 || bg.a == 0 {
            return;
        }
        let t = thickness.min(rect.width.max(0)).min(rect.height.max(0));
        self.fill(Rect::new(rect.x, rect.y, rect.width, t), bg);
        self.fill(Rect::new(rect.x, rect.bottom() - t, rect.width, t), bg);
        self.fill(Rect::new(rect.x, rect.y, t, rect.height), bg);
        self.fill(Rect::new(rect.right() - t, rect.y, t, rect.height), bg);
    }

    /// Write `text` on one row, keeping each cell's background.
    pub fn print(&mut self, text: &str, fg: Color, origin: Point) -> Size {
        let mut width = 0;
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(origin.x + i as i32, origin.y) {
                cell.ch = ch;
                cell.fg = fg;
            }
            width += 1;
        }
        Size::new(width, 1)
    }

    /// Copy image pixels into cell backgrounds; transparent pixels are skipped.
    pub fn blit(&mut self, image: &Image, dest: Rect, scaled: bool) {
        let area = if scaled { dest } else { dest.with_size(image.size()) };
        for dy in 0..area.height {
            for dx in 0..area.width {
                let color = if scaled {
                    image.sample(dx, dy, area.size())
                } else {
                    image.pixel(dx as u32, dy as u32)
                };
                match color {
                    Some(c) if c.a > 0 => {
                        if let Some(cell) = self.cell_mut(area.x + dx, area.y + dy) {
                            *cell = Cell::blank(c);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    /// Cells of `self` that differ from `previous`. A size change repaints
    /// everything.
    pub fn diff(&self, previous: &CellBuffer) -> Vec<CellUpdate> {
        let same_size = previous.size() == self.size();
        self.cells
            .iter()
            .enumerate()
            .filter(|(i, cell)| !same_size || previous.cells[*i] != **cell)
            .map(|(i, cell)| CellUpdate {
                x: (i as i32 % self.width) as u16,
                y: (i as i32 / self.width) as u16,
                cell: *cell,
            })
            .collect()
    }

    /// The characters of row `y`, for assertions.
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width).filter_map(|x| self.get(x, y)).map(|c| c.ch).collect()
    }
}

fn to_crossterm(c: Color) -> crossterm::style::Color {
    crossterm::style::Color::Rgb { r: c.r, g: c.g, b: c.b }
}

// ---------------------------------------------------------------------------
// TerminalSurface
// ---------------------------------------------------------------------------

/// Terminal output backend using crossterm.
///
/// Does NOT enter the alternate screen on creation; call [`enter`](Self::enter)
/// explicitly and [`leave`](Self::leave) before exiting.
pub struct TerminalSurface {
    writer: BufWriter<Stdout>,
    back: CellBuffer,
    front: Option<CellBuffer>,
}

impl TerminalSurface {
    /// Create a surface sized to the current terminal.
    pub fn new() -> io::Result<Self> {
        let (w, h) = terminal::size()?;
        Ok(Self::with_size(Size::new(i32::from(w), i32::from(h))))
    }

    /// Create a surface with an explicit size.
    pub fn with_size(size: Size) -> Self {
        Self { writer: BufWriter::new(io::stdout()), back: CellBuffer::new(size), front: None }
    }

    /// Enter the alternate screen, enable raw mode and mouse capture.
    pub fn enter(&mut self) -> io::Result<()> {
        execute!(self.writer, EnterAlternateScreen, ct_event::EnableMouseCapture, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        Ok(())
    }

    /// Undo [`enter`](Self::enter).
    pub fn leave(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.writer, cursor::Show, ct_event::DisableMouseCapture, LeaveAlternateScreen)?;
        Ok(())
    }

    /// The frame being drawn.
    pub fn buffer(&self) -> &CellBuffer {
        &self.back
    }

    fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        for update in updates {
            queue!(
                self.writer,
                cursor::MoveTo(update.x, update.y),
                SetBackgroundColor(to_crossterm(update.cell.bg)),
                SetForegroundColor(to_crossterm(update.cell.fg)),
                Print(update.cell.ch),
            )?;
        }
        queue!(self.writer, ResetColor)?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> Size {
        self.back.size()
    }

    fn resize(&mut self, size: Size) {
        if size != self.back.size() {
            self.back = CellBuffer::new(size);
            self.front = None;
        }
    }

    fn clear(&mut self, color: Color) {
        self.back.clear(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, _radius: i32) {
        self.back.fill(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: i32, _radius: i32) {
        self.back.outline(rect, color, thickness);
    }

    fn measure_text(&self, text: &str, _font: &Font) -> Size {
        Size::new(text.chars().count() as i32, 1)
    }

    fn draw_text(&mut self, text: &str, _font: &Font, color: Color, origin: Point) -> Size {
        self.back.print(text, color, origin)
    }

    fn blit_image(&mut self, image: &Image, dest: Rect, scaled: bool) {
        self.back.blit(image, dest, scaled);
    }

    fn present(&mut self) -> io::Result<()> {
        let updates = match &self.front {
            Some(front) => self.back.diff(front),
            None => self.back.diff(&CellBuffer::new(Size::ZERO)),
        };
        self.apply_updates(&updates)?;
        self.writer.flush()?;
        self.front = Some(self.back.clone());
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        if let Err(err) = execute!(self.writer, terminal::SetTitle(title)) {
            tracing::debug!(target: "trellis::render", error = %err, "failed to set terminal title");
        }
    }
}

// ---------------------------------------------------------------------------
// TerminalEvents
// ---------------------------------------------------------------------------

/// Reads crossterm events, waiting at most one frame for the first one.
#[derive(Debug, Clone)]
pub struct TerminalEvents {
    frame_time: Duration,
}

impl TerminalEvents {
    pub fn new() -> Self {
        Self { frame_time: Duration::from_millis(16) }
    }

    /// How long `poll_events` may wait when no input is pending.
    pub fn with_frame_time(mut self, frame_time: Duration) -> Self {
        self.frame_time = frame_time;
        self
    }
}

impl Default for TerminalEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for TerminalEvents {
    fn poll_events(&mut self) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();
        let mut timeout = self.frame_time;
        while ct_event::poll(timeout)? {
            if let Some(event) = Event::from_crossterm(ct_event::read()?) {
                events.push(event);
            }
            timeout = Duration::ZERO;
        }
        Ok(events)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
