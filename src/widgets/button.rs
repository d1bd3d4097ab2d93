//! Push and toggle buttons.
//!
//! Per event, in batch order:
//! - pointer move: `hovered` follows the pointer.
//! - pointer down inside: plain buttons become pressed, toggle buttons flip
//!   once per press; `clicked` fires. Outside: `lost_focus` fires.
//! - pointer up: plain buttons release; the toggle latch resets.

use crate::css::color::Color;
use crate::css::stylesheet::StyleSet;
use crate::css::styles::StyleRecord;
use crate::event::Event;
use crate::geometry::Rect;
use crate::render::Surface;
use crate::widget::paint::{draw_box, draw_caption};
use crate::widget::{Widget, WidgetBase};

/// What a pointer-down did to a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSignal {
    Clicked,
    LostFocus,
}

/// A clickable caption.
pub struct Button {
    base: WidgetBase,
    text: String,
    toggle: bool,
    hovered: bool,
    pressed: bool,
    /// Set on the press that flipped a toggle button, cleared on release.
    toggled: bool,
    clicked: Option<Box<dyn FnMut()>>,
    lost_focus: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub const NORMAL: &'static str = "btn.normal";
    pub const HOVER: &'static str = "btn.hover";
    pub const PRESSED: &'static str = "btn.pressed";

    /// The three state selectors with the given corner radius.
    pub fn styles_with_radius(radius: i32) -> StyleSet {
        let state = |bg: Color| StyleRecord::new().with_bg(bg).with_radius(radius).with_text_color(Color::WHITE);
        StyleSet::new()
            .with(Self::NORMAL, state(Color::rgb(0x87, 0x87, 0x87)))
            .with(Self::HOVER, state(Color::rgb(0xa9, 0xa9, 0xa9)))
            .with(Self::PRESSED, state(Color::rgb(0x56, 0x56, 0x56)))
    }

    pub fn default_styles() -> StyleSet {
        Self::styles_with_radius(4)
    }

    pub fn new(text: impl Into<String>) -> Self {
        Self::with_styles(text, Self::default_styles())
    }

    /// A button that stays pressed until clicked again.
    pub fn toggle(text: impl Into<String>) -> Self {
        let mut button = Self::new(text);
        button.toggle = true;
        button
    }

    /// A button with a custom initial style set.
    pub fn with_styles(text: impl Into<String>, styles: StyleSet) -> Self {
        Self {
            base: WidgetBase::new(styles),
            text: text.into(),
            toggle: false,
            hovered: false,
            pressed: false,
            toggled: false,
            clicked: None,
            lost_focus: None,
        }
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.base.set_rect(rect);
        self
    }

    pub fn on_clicked(mut self, callback: impl FnMut() + 'static) -> Self {
        self.clicked = Some(Box::new(callback));
        self
    }

    pub fn on_lost_focus(mut self, callback: impl FnMut() + 'static) -> Self {
        self.lost_focus = Some(Box::new(callback));
        self
    }

    pub fn set_on_clicked(&mut self, callback: impl FnMut() + 'static) {
        self.clicked = Some(Box::new(callback));
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_toggle(&self) -> bool {
        self.toggle
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Forget hover and press state. A toggle button keeps its latch.
    pub fn reset_interaction(&mut self) {
        self.hovered = false;
        self.toggled = false;
        if !self.toggle {
            self.pressed = false;
        }
    }

    /// The record for the current state: pressed, then hovered, then normal.
    pub fn current_style(&self) -> &StyleRecord {
        let selector = if self.pressed {
            Self::PRESSED
        } else if self.hovered {
            Self::HOVER
        } else {
            Self::NORMAL
        };
        self.base.styles().resolve(selector)
    }

    fn inside(&self, event: &Event) -> bool {
        match (self.base.rect(), event.position()) {
            (Some(rect), Some(p)) => rect.contains(p),
            _ => false,
        }
    }

    /// Apply one event; reports clicks and focus loss to the caller after
    /// running the callbacks.
    pub fn process_event(&mut self, event: &Event) -> Option<ButtonSignal> {
        match event {
            Event::PointerMove(_) => {
                self.hovered = self.inside(event);
                None
            }
            Event::PointerDown(_) => {
                self.hovered = self.inside(event);
                if self.hovered {
                    if self.toggle {
                        if !self.toggled {
                            self.pressed = !self.pressed;
                            self.toggled = true;
                        }
                    } else {
                        self.pressed = true;
                    }
                    if let Some(cb) = self.clicked.as_mut() {
                        cb();
                    }
                    Some(ButtonSignal::Clicked)
                } else {
                    if let Some(cb) = self.lost_focus.as_mut() {
                        cb();
                    }
                    Some(ButtonSignal::LostFocus)
                }
            }
            Event::PointerUp(_) => {
                if !self.toggle {
                    self.pressed = false;
                }
                self.toggled = false;
                None
            }
            _ => None,
        }
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        let Some(rect) = self.base.rect() else { return };
        let style = self.current_style();
        draw_box(surface, rect, style);
        draw_caption(surface, rect, style, &self.text);
    }

    fn handle_events(&mut self, events: &[Event]) {
        for event in events {
            self.process_event(event);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::testing::RecordingSurface;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, move || c.set(c.get() + 1))
    }

    fn down(x: i32, y: i32) -> Event {
        Event::PointerDown(Point::new(x, y))
    }

    fn up(x: i32, y: i32) -> Event {
        Event::PointerUp(Point::new(x, y))
    }

    // ── Plain ────────────────────────────────────────────────────────

    #[test]
    fn click_presses_then_releases() {
        let (clicks, cb) = counter();
        let mut button = Button::new("OK").with_rect(Rect::new(0, 0, 100, 50)).on_clicked(cb);

        button.handle_events(&[down(50, 25)]);
        assert!(button.is_pressed());
        assert_eq!(clicks.get(), 1);

        button.handle_events(&[up(500, 500)]);
        assert!(!button.is_pressed());
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn edges_count_as_inside() {
        let (clicks, cb) = counter();
        let mut button = Button::new("OK").with_rect(Rect::new(0, 0, 100, 50)).on_clicked(cb);
        button.handle_events(&[down(100, 50), up(0, 0), down(0, 0)]);
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn down_outside_reports_lost_focus() {
        let (lost, cb) = counter();
        let mut button = Button::new("OK").with_rect(Rect::new(0, 0, 10, 10)).on_lost_focus(cb);
        assert_eq!(button.process_event(&down(50, 50)), Some(ButtonSignal::LostFocus));
        assert_eq!(lost.get(), 1);
        assert!(!button.is_pressed());
    }

    #[test]
    fn hover_follows_pointer() {
        let mut button = Button::new("OK").with_rect(Rect::new(0, 0, 10, 10));
        button.handle_events(&[Event::PointerMove(Point::new(5, 5))]);
        assert!(button.is_hovered());
        button.handle_events(&[Event::PointerMove(Point::new(11, 5))]);
        assert!(!button.is_hovered());
    }

    #[test]
    fn detached_button_ignores_pointer() {
        let (clicks, cb) = counter();
        let mut button = Button::new("OK").on_clicked(cb);
        button.handle_events(&[down(0, 0)]);
        assert_eq!(clicks.get(), 0);
    }

    // ── Toggle ───────────────────────────────────────────────────────

    #[test]
    fn toggle_flips_once_per_press() {
        let mut button = Button::toggle("Bold").with_rect(Rect::new(0, 0, 10, 10));
        button.handle_events(&[down(1, 1)]);
        assert!(button.is_pressed());
        // A second down without an up is latched.
        button.handle_events(&[down(1, 1)]);
        assert!(button.is_pressed());
        button.handle_events(&[up(1, 1)]);
        assert!(button.is_pressed());
        button.handle_events(&[down(1, 1), up(1, 1)]);
        assert!(!button.is_pressed());
    }

    // ── Paint ────────────────────────────────────────────────────────

    #[test]
    fn style_precedence() {
        let mut button = Button::new("OK").with_rect(Rect::new(0, 0, 10, 10));
        assert_eq!(button.current_style().bg_color, Some(Color::rgb(0x87, 0x87, 0x87)));
        button.handle_events(&[Event::PointerMove(Point::new(1, 1))]);
        assert_eq!(button.current_style().bg_color, Some(Color::rgb(0xa9, 0xa9, 0xa9)));
        button.handle_events(&[down(1, 1)]);
        assert_eq!(button.current_style().bg_color, Some(Color::rgb(0x56, 0x56, 0x56)));
    }

    #[test]
    fn paint_uses_state_style() {
        let mut button = Button::new("Go").with_rect(Rect::new(0, 0, 8, 3));
        button.handle_events(&[down(1, 1)]);
        let mut surface = RecordingSurface::new(10, 5);
        button.paint(&mut surface);
        insta::assert_snapshot!(surface.log(), @r"
        fill (0,0 8x3) #565656 r4
        text (3,1) #ffffff 'Go'
        ");
    }

    #[test]
    fn hover_stylesheet_overlay_keeps_normal() {
        let mut button = Button::new("OK");
        let normal = button.styles().get(Button::NORMAL).cloned();
        button.set_style_sheet("btn.hover{background-color:#a9a9a9;}").unwrap();
        assert_eq!(button.styles().get(Button::HOVER).and_then(|r| r.bg_color), Some(Color::rgb(169, 169, 169)));
        assert_eq!(button.styles().get(Button::NORMAL).cloned(), normal);
    }
}
