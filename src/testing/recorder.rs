//! A [`Surface`] that records draw calls as text instead of drawing.

use std::fmt;
use std::io;

use crate::css::color::Color;
use crate::css::styles::Font;
use crate::geometry::{Point, Rect, Size};
use crate::image::Image;
use crate::render::Surface;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Fill { rect: Rect, color: Color, radius: i32 },
    Stroke { rect: Rect, color: Color, thickness: i32, radius: i32 },
    Text { origin: Point, color: Color, text: String },
    Blit { dest: Rect, image: Size, scaled: bool },
    Present,
}

struct R(Rect);

impl fmt::Display for R {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{} {}x{})", self.0.x, self.0.y, self.0.width, self.0.height)
    }
}

impl fmt::Display for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawOp::Clear(color) => write!(f, "clear {color}"),
            DrawOp::Fill { rect, color, radius } => write!(f, "fill {} {color} r{radius}", R(*rect)),
            DrawOp::Stroke { rect, color, thickness, radius } => {
                write!(f, "stroke {} {color} w{thickness} r{radius}", R(*rect))
            }
            DrawOp::Text { origin, color, text } => write!(f, "text ({},{}) {color} '{text}'", origin.x, origin.y),
            DrawOp::Blit { dest, image, scaled } => {
                let mode = if *scaled { "scaled" } else { "unscaled" };
                write!(f, "blit {} {}x{} {mode}", R(*dest), image.width, image.height)
            }
            DrawOp::Present => f.write_str("present"),
        }
    }
}

/// Headless surface for tests.
///
/// Text measures one unit per character and one unit high, like the
/// terminal backend.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    title: Option<String>,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self { size: Size::new(width, height), title: None, ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// One line per recorded op.
    pub fn log(&self) -> String {
        self.ops.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    }

    /// Ops since the last `clear`.
    pub fn frame_log(&self) -> String {
        let start = self.ops.iter().rposition(|op| matches!(op, DrawOp::Clear(_))).map_or(0, |i| i + 1);
        self.ops[start..].iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Number of presented frames.
    pub fn frames(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Present).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn clear(&mut self, color: Color) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, radius: i32) {
        self.ops.push(DrawOp::Fill { rect, color, radius });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: i32, radius: i32) {
        self.ops.push(DrawOp::Stroke { rect, color, thickness, radius });
    }

    fn measure_text(&self, text: &str, _font: &Font) -> Size {
        Size::new(text.chars().count() as i32, 1)
    }

    fn draw_text(&mut self, text: &str, font: &Font, color: Color, origin: Point) -> Size {
        self.ops.push(DrawOp::Text { origin, color, text: text.to_owned() });
        self.measure_text(text, font)
    }

    fn blit_image(&mut self, image: &Image, dest: Rect, scaled: bool) {
        self.ops.push(DrawOp::Blit { dest, image: image.size(), scaled });
    }

    fn present(&mut self) -> io::Result<()> {
        self.ops.push(DrawOp::Present);
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_owned());
    }
}
