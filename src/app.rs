//! Window manager: top-level widgets, menu bar, timers, the frame loop.
//!
//! [`WindowManager`] is generic over its [`Surface`] and [`EventSource`], so
//! the same loop drives a terminal ([`TerminalSurface`](crate::render::TerminalSurface))
//! or a headless [`RecordingSurface`](crate::testing::RecordingSurface).

use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Instant;

use crate::css::color::Color;
use crate::event::{Event, EventSource};
use crate::geometry::{Rect, Size};
use crate::menu::MenuBar;
use crate::render::Surface;
use crate::timer::{Timer, TimerId, TimerRegistry};
use crate::widget::{Element, Widget};

// ---------------------------------------------------------------------------
// WindowConfig
// ---------------------------------------------------------------------------

/// Window settings applied when the manager is built.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    /// `None` uses the surface's own size (fullscreen).
    pub resolution: Option<Size>,
    pub resizable: bool,
    /// Cleared to at the start of every frame.
    pub background: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: String::new(), resolution: Some(Size::new(800, 600)), resizable: true, background: Color::BLACK }
    }
}

impl WindowConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    pub fn with_resolution(mut self, resolution: Size) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Use whatever size the surface already has.
    pub fn fullscreen(mut self) -> Self {
        self.resolution = None;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

// ---------------------------------------------------------------------------
// QuitHandle
// ---------------------------------------------------------------------------

/// Cloneable request to stop [`WindowManager::run`], for use inside callbacks.
#[derive(Debug, Clone, Default)]
pub struct QuitHandle(Rc<Cell<bool>>);

impl QuitHandle {
    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}

// ---------------------------------------------------------------------------
// WindowManager
// ---------------------------------------------------------------------------

pub struct WindowManager<S: Surface, E: EventSource> {
    config: WindowConfig,
    surface: S,
    events: E,
    widgets: Vec<Element>,
    menu_bar: Option<MenuBar>,
    timers: TimerRegistry,
    /// Area below the menu bar handed to top-level widgets.
    layout_rect: Rect,
    /// This frame's batch; replaced every frame.
    pending: Vec<Event>,
    quit: QuitHandle,
    quit_event: bool,
}

impl<S: Surface, E: EventSource> WindowManager<S, E> {
    pub fn new(config: WindowConfig, mut surface: S, events: E) -> Self {
        if let Some(resolution) = config.resolution {
            surface.resize(resolution);
        }
        surface.set_title(&config.title);
        let mut wm = Self {
            config,
            surface,
            events,
            widgets: Vec::new(),
            menu_bar: None,
            timers: TimerRegistry::new(),
            layout_rect: Rect::EMPTY,
            pending: Vec::new(),
            quit: QuitHandle::default(),
            quit_event: false,
        };
        wm.update_layout_rect();
        wm
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// The area top-level widgets without a rectangle of their own fill.
    pub fn layout_rect(&self) -> Rect {
        self.layout_rect
    }

    /// Recompute the layout rectangle from the surface size and menu bar
    /// height, and hand it to the top-level widgets.
    pub fn update_layout_rect(&mut self) {
        let size = self.surface.size();
        let menu_height = self.menu_bar.as_ref().map_or(0, MenuBar::height);
        self.layout_rect = Rect::new(0, menu_height, size.width, (size.height - menu_height).max(0));
        tracing::debug!(target: "trellis::app", rect = ?self.layout_rect, "layout rect");
        for widget in &mut self.widgets {
            widget.attach(Some(self.layout_rect));
        }
    }

    /// Add a top-level widget; returns it for further setup.
    pub fn add_widget(&mut self, widget: impl Into<Element>) -> &mut Element {
        let mut widget = widget.into();
        widget.attach(Some(self.layout_rect));
        self.widgets.push(widget);
        let last = self.widgets.len() - 1;
        &mut self.widgets[last]
    }

    pub fn widgets(&self) -> &[Element] {
        &self.widgets
    }

    pub fn widget_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.widgets.get_mut(index)
    }

    /// Create the menu bar on first use and shrink the layout area below it.
    pub fn build_menu_bar(&mut self) -> &mut MenuBar {
        if self.menu_bar.is_none() {
            self.menu_bar = Some(MenuBar::new());
            self.update_layout_rect();
        }
        self.menu_bar.get_or_insert_with(MenuBar::new)
    }

    pub fn menu_bar(&self) -> Option<&MenuBar> {
        self.menu_bar.as_ref()
    }

    pub fn menu_bar_mut(&mut self) -> Option<&mut MenuBar> {
        self.menu_bar.as_mut()
    }

    /// Register a stopped timer firing every `interval_secs`.
    pub fn build_timer(&mut self, callback: impl FnMut() + 'static, interval_secs: f64) -> TimerId {
        self.timers.insert(Timer::from_secs(callback, interval_secs))
    }

    pub fn add_timer(&mut self, timer: Timer) -> TimerId {
        self.timers.insert(timer)
    }

    pub fn timer_mut(&mut self, id: TimerId) -> Option<&mut Timer> {
        self.timers.get_mut(id)
    }

    pub fn remove_timer(&mut self, id: TimerId) -> Option<Timer> {
        self.timers.remove(id)
    }

    pub fn quit_handle(&self) -> QuitHandle {
        self.quit.clone()
    }

    pub fn request_quit(&self) {
        self.quit.request();
    }

    /// A quit event arrived or a [`QuitHandle`] asked to stop.
    pub fn should_quit(&self) -> bool {
        self.quit_event || self.quit.is_requested()
    }

    /// The event batch of the last frame.
    pub fn pending_events(&self) -> &[Event] {
        &self.pending
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// Run one frame.
    ///
    /// Clear, fetch events, handle resizes, paint then dispatch each visible
    /// top-level widget, paint then dispatch the menu bar, present, poll timers.
    pub fn process(&mut self) -> io::Result<()> {
        self.surface.clear(self.config.background);
        self.pending = self.events.poll_events()?;

        let mut resized = false;
        for event in &self.pending {
            match *event {
                Event::Resize(size) => {
                    self.surface.resize(size);
                    resized = true;
                }
                Event::Quit => self.quit_event = true,
                _ => {}
            }
        }
        if resized {
            self.update_layout_rect();
        }
        if !self.pending.is_empty() {
            tracing::trace!(target: "trellis::app", events = self.pending.len(), "frame");
        }

        for widget in self.widgets.iter_mut().filter(|w| w.is_visible()) {
            widget.paint(&mut self.surface);
            widget.handle_events(&self.pending);
        }
        if let Some(bar) = self.menu_bar.as_mut() {
            bar.paint(&mut self.surface);
            bar.handle_events(&self.pending);
        }

        self.surface.present()?;
        self.timers.poll_at(Instant::now());
        Ok(())
    }

    /// Run frames until a quit event or a quit request.
    pub fn run(&mut self) -> io::Result<()> {
        tracing::debug!(target: "trellis::app", title = %self.config.title, "window loop started");
        while !self.should_quit() {
            self.process()?;
        }
        tracing::debug!(target: "trellis::app", "window loop finished");
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::layout::BoxLayout;
    use crate::testing::{RecordingSurface, ScriptedEvents};
    use crate::widgets::{Button, Label};
    use pretty_assertions::assert_eq;

    fn manager() -> WindowManager<RecordingSurface, ScriptedEvents> {
        WindowManager::new(
            WindowConfig::new("test").with_resolution(Size::new(200, 100)),
            RecordingSurface::new(10, 10),
            ScriptedEvents::new(),
        )
    }

    // ── WindowConfig ─────────────────────────────────────────────────

    #[test]
    fn config_builder() {
        let config = WindowConfig::new("Demo").fullscreen().with_resizable(false).with_background(Color::WHITE);
        assert_eq!(
            config,
            WindowConfig { title: "Demo".into(), resolution: None, resizable: false, background: Color::WHITE }
        );
    }

    #[test]
    fn resolution_resizes_surface_and_sets_title() {
        let wm = manager();
        assert_eq!(wm.surface().size(), Size::new(200, 100));
        assert_eq!(wm.surface().title(), Some("test"));
        assert_eq!(wm.layout_rect(), Rect::new(0, 0, 200, 100));
    }

    #[test]
    fn fullscreen_keeps_surface_size() {
        let wm = WindowManager::new(WindowConfig::new("").fullscreen(), RecordingSurface::new(80, 24), ScriptedEvents::new());
        assert_eq!(wm.layout_rect(), Rect::new(0, 0, 80, 24));
    }

    // ── Layout rectangle ─────────────────────────────────────────────

    #[test]
    fn menu_bar_shrinks_layout_rect() {
        let mut wm = manager();
        wm.add_widget(Label::new("body"));
        wm.build_menu_bar();
        assert_eq!(wm.layout_rect(), Rect::new(0, 20, 200, 80));
        assert_eq!(wm.widgets()[0].rect(), Some(Rect::new(0, 20, 200, 80)));
    }

    #[test]
    fn resize_event_updates_inherited_rects_only() {
        let mut wm = manager();
        wm.add_widget(BoxLayout::vertical().with(Label::new("a")));
        wm.add_widget(Button::new("fixed").with_rect(Rect::new(1, 1, 5, 5)));
        wm.events_mut().push([Event::Resize(Size::new(300, 150))]);
        wm.process().unwrap();
        assert_eq!(wm.layout_rect(), Rect::new(0, 0, 300, 150));
        assert_eq!(wm.widgets()[0].rect(), Some(Rect::new(0, 0, 300, 150)));
        assert_eq!(wm.widgets()[1].rect(), Some(Rect::new(1, 1, 5, 5)));
    }

    // ── Frame ────────────────────────────────────────────────────────

    #[test]
    fn frame_clears_paints_and_presents() {
        let mut wm = manager();
        wm.add_widget(Label::new("hi").with_rect(Rect::new(0, 0, 10, 2)));
        wm.process().unwrap();
        insta::assert_snapshot!(wm.surface().log(), @r"
        clear #000000
        fill (0,0 10x2) #646464 r0
        text (4,1) #000000 'hi'
        present
        ");
    }

    #[test]
    fn hidden_widgets_are_skipped() {
        let mut wm = manager();
        wm.add_widget(Button::new("b").with_rect(Rect::new(0, 0, 10, 10))).set_visible(false);
        wm.events_mut().push([Event::PointerMove(Point::new(1, 1))]);
        wm.process().unwrap();
        assert!(!wm.widgets()[0].as_button().is_some_and(Button::is_hovered));
        assert_eq!(wm.surface().ops().len(), 2);
    }

    #[test]
    fn batch_is_replaced_every_frame() {
        let mut wm = manager();
        wm.events_mut().push([Event::PointerMove(Point::new(1, 1))]);
        wm.process().unwrap();
        assert_eq!(wm.pending_events().len(), 1);
        wm.process().unwrap();
        assert!(wm.pending_events().is_empty());
    }

    // ── Timers and quitting ──────────────────────────────────────────

    #[test]
    fn timers_fire_after_frames() {
        let mut wm = manager();
        let ticks = Rc::new(Cell::new(0));
        let t = ticks.clone();
        let id = wm.build_timer(move || t.set(t.get() + 1), 0.0);
        wm.process().unwrap();
        assert_eq!(ticks.get(), 0);

        wm.timer_mut(id).unwrap().start();
        wm.process().unwrap();
        wm.process().unwrap();
        assert_eq!(ticks.get(), 2);

        assert!(wm.remove_timer(id).is_some());
        wm.process().unwrap();
        assert_eq!(ticks.get(), 2);
    }

    #[test]
    fn quit_event_stops_run() {
        let mut wm = manager();
        wm.process().unwrap();
        wm.events_mut().push([Event::Quit]);
        wm.run().unwrap();
        assert!(wm.should_quit());
        assert_eq!(wm.surface().frames(), 2);
    }

    #[test]
    fn quit_handle_stops_run_from_a_callback() {
        let mut wm = manager();
        let quit = wm.quit_handle();
        wm.add_widget(Button::new("quit").with_rect(Rect::new(0, 0, 10, 10)).on_clicked(move || quit.request()));
        wm.events_mut().push([Event::PointerDown(Point::new(2, 2))]);
        wm.run().unwrap();
        assert_eq!(wm.surface().frames(), 1);
    }
}
