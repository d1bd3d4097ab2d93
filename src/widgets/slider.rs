//! Slider: a track with a draggable thumb.
//!
//! The value lives in `[0, 1]`. The thumb rectangle is a pure function of the
//! value, the track rectangle and the thumb extent, recomputed whenever any
//! of them changes.

use crate::css::color::Color;
use crate::css::stylesheet::StyleSet;
use crate::css::styles::StyleRecord;
use crate::event::Event;
use crate::geometry::{Orientation, Point, Rect};
use crate::render::Surface;
use crate::widget::paint::draw_box;
use crate::widget::{Widget, WidgetBase};

/// Default thumb extent along the primary axis.
const THUMB_EXTENT: i32 = 20;
/// The track is drawn this much narrower on each side of the cross axis.
const TRACK_INSET: i32 = 5;

pub struct Slider {
    base: WidgetBase,
    orientation: Orientation,
    value: f32,
    hovered: bool,
    thumb_hovered: bool,
    pressed: bool,
    thumb: Rect,
    value_changed: Option<Box<dyn FnMut(f32)>>,
    pressed_callback: Option<Box<dyn FnMut()>>,
}

impl Slider {
    pub const OUTER: &'static str = "slider.outer";
    pub const THUMB_NORMAL: &'static str = "slider.selector.normal";
    pub const THUMB_HOVER: &'static str = "slider.selector.hover";
    pub const THUMB_PRESSED: &'static str = "slider.selector.pressed";

    pub fn default_styles(orientation: Orientation) -> StyleSet {
        let thumb = |bg: Color| {
            let r = StyleRecord::new().with_bg(bg).with_border(1, 15).with_text_color(Color::WHITE);
            match orientation {
                Orientation::Horizontal => r.with_width(THUMB_EXTENT),
                Orientation::Vertical => r.with_height(THUMB_EXTENT),
            }
        };
        StyleSet::new()
            .with(
                Self::OUTER,
                StyleRecord::new()
                    .with_bg(Color::rgb(0x87, 0x87, 0x87))
                    .with_border(3, 3)
                    .with_text_color(Color::WHITE),
            )
            .with(Self::THUMB_NORMAL, thumb(Color::rgb(0xa7, 0xa7, 0xa7)))
            .with(Self::THUMB_HOVER, thumb(Color::rgb(0xc6, 0xc6, 0xc6)))
            .with(Self::THUMB_PRESSED, thumb(Color::rgb(0x56, 0x56, 0x56)))
    }

    pub fn new(orientation: Orientation) -> Self {
        Self {
            base: WidgetBase::new(Self::default_styles(orientation)),
            orientation,
            value: 0.0,
            hovered: false,
            thumb_hovered: false,
            pressed: false,
            thumb: Rect::EMPTY,
            value_changed: None,
            pressed_callback: None,
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.set_rect(rect);
        self
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.set_value(value);
        self
    }

    /// Called with the new value after every pointer-driven change.
    pub fn on_value_changed(mut self, callback: impl FnMut(f32) + 'static) -> Self {
        self.value_changed = Some(Box::new(callback));
        self
    }

    /// Called when a drag starts on the thumb.
    pub fn on_pressed(mut self, callback: impl FnMut() + 'static) -> Self {
        self.pressed_callback = Some(Box::new(callback));
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value (clamped to `[0, 1]`). Does not fire callbacks.
    pub fn set_value(&mut self, value: f32) {
        self.value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.update_thumb();
    }

    pub fn thumb_rect(&self) -> Rect {
        self.thumb
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_thumb_hovered(&self) -> bool {
        self.thumb_hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn thumb_extent(&self) -> i32 {
        let style = self.base.styles().resolve(Self::THUMB_NORMAL);
        let extent = match self.orientation {
            Orientation::Horizontal => style.width,
            Orientation::Vertical => style.height,
        };
        extent.unwrap_or(THUMB_EXTENT)
    }

    fn update_thumb(&mut self) {
        let Some(track) = self.base.rect() else {
            self.thumb = Rect::EMPTY;
            return;
        };
        let thumb = self.thumb_extent();
        let travel = track.extent(self.orientation) - thumb;
        let offset = track.start(self.orientation) + (travel as f32 * self.value) as i32;
        self.thumb = match self.orientation {
            Orientation::Horizontal => Rect::new(offset, track.y, thumb, track.height),
            Orientation::Vertical => Rect::new(track.x, offset, track.width, thumb),
        };
    }

    /// Clamped fraction of the track at `p` along the primary axis.
    fn fraction_at(&self, p: Point) -> f32 {
        let Some(track) = self.base.rect() else { return self.value };
        let extent = track.extent(self.orientation);
        if extent <= 0 {
            return 0.0;
        }
        let along = p.along(self.orientation) - track.start(self.orientation);
        (along as f32 / extent as f32).clamp(0.0, 1.0)
    }

    fn change_to(&mut self, value: f32) {
        self.set_value(value);
        if let Some(cb) = self.value_changed.as_mut() {
            cb(self.value);
        }
    }

    fn track_hover(&mut self, p: Point) {
        self.hovered = self.base.rect().is_some_and(|r| r.contains(p));
        self.thumb_hovered = self.base.rect().is_some() && self.thumb.contains(p);
    }

    fn process_event(&mut self, event: &Event) {
        match *event {
            Event::PointerMove(p) => {
                self.track_hover(p);
                if self.pressed {
                    self.change_to(self.fraction_at(p));
                }
            }
            Event::PointerDown(p) => {
                self.track_hover(p);
                if self.thumb_hovered {
                    self.pressed = true;
                    if let Some(cb) = self.pressed_callback.as_mut() {
                        cb();
                    }
                }
            }
            Event::PointerUp(p) => {
                self.track_hover(p);
                if self.pressed {
                    self.change_to(self.fraction_at(p));
                } else if self.hovered && !self.thumb_hovered {
                    self.change_to(self.fraction_at(p));
                }
                self.pressed = false;
            }
            _ => {}
        }
    }
}

impl Widget for Slider {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn geometry_changed(&mut self) {
        self.update_thumb();
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        let Some(rect) = self.base.rect() else { return };
        let styles = self.base.styles();
        draw_box(surface, rect.inset_cross(self.orientation, TRACK_INSET), styles.resolve(Self::OUTER));

        let thumb_style = if self.pressed {
            Self::THUMB_PRESSED
        } else if self.thumb_hovered {
            Self::THUMB_HOVER
        } else {
            Self::THUMB_NORMAL
        };
        draw_box(surface, self.thumb, styles.resolve(thumb_style));
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
    use crate::testing::RecordingSurface;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<f32>>>, impl FnMut(f32) + 'static) {
        let values = Rc::new(RefCell::new(Vec::new()));
        let v = values.clone();
        (values, move |x| v.borrow_mut().push(x))
    }

    // ── Thumb geometry ───────────────────────────────────────────────

    #[test]
    fn thumb_offset_formula_is_exact_and_idempotent() {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let track = Rect::new(7, 3, 230, 170);
            let mut slider = Slider::new(orientation).with_rect(track);
            for v in [-0.5f32, 0.0, 0.1, 0.25, 1.0 / 3.0, 0.5, 0.9, 1.0, 1.5] {
                slider.set_value(v);
                let first = slider.thumb_rect();
                slider.set_value(v);
                assert_eq!(slider.thumb_rect(), first);

                let expected =
                    track.start(orientation) + ((track.extent(orientation) - 20) as f32 * v.clamp(0.0, 1.0)) as i32;
                assert_eq!(first.start(orientation), expected, "{orientation:?} v={v}");
                assert_eq!(first.extent(orientation), 20);
            }
        }
    }

    #[test]
    fn thumb_follows_rect_changes() {
        let mut slider = Slider::horizontal().with_value(0.5);
        assert_eq!(slider.thumb_rect(), Rect::EMPTY);
        slider.set_rect(Rect::new(0, 0, 120, 30));
        assert_eq!(slider.thumb_rect(), Rect::new(50, 0, 20, 30));
    }

    #[test]
    fn thumb_extent_from_stylesheet() {
        let mut slider = Slider::vertical().with_rect(Rect::new(0, 0, 30, 110));
        slider.set_style_sheet("slider.selector.normal { height: 10 }").unwrap();
        slider.set_value(1.0);
        assert_eq!(slider.thumb_rect(), Rect::new(0, 100, 30, 10));
    }

    // ── Events ───────────────────────────────────────────────────────

    #[test]
    fn drag_thumb() {
        let (values, cb) = recorder();
        let presses = Rc::new(RefCell::new(0));
        let p = presses.clone();
        let mut slider = Slider::horizontal()
            .with_rect(Rect::new(0, 0, 200, 20))
            .on_value_changed(cb)
            .on_pressed(move || *p.borrow_mut() += 1);

        slider.handle_events(&[Event::PointerDown(Point::new(5, 10))]);
        assert!(slider.is_pressed());
        assert_eq!(*presses.borrow(), 1);

        slider.handle_events(&[Event::PointerMove(Point::new(100, 10))]);
        assert_eq!(slider.value(), 0.5);
        slider.handle_events(&[Event::PointerMove(Point::new(400, 10))]);
        assert_eq!(slider.value(), 1.0);
        slider.handle_events(&[Event::PointerUp(Point::new(50, 10))]);
        assert!(!slider.is_pressed());
        assert_eq!(slider.value(), 0.25);
        assert_eq!(*values.borrow(), vec![0.5, 1.0, 0.25]);
    }

    #[test]
    fn track_click_jumps_on_release() {
        let (values, cb) = recorder();
        let mut slider = Slider::horizontal().with_rect(Rect::new(0, 0, 200, 20)).on_value_changed(cb);

        slider.handle_events(&[Event::PointerDown(Point::new(150, 10))]);
        assert!(!slider.is_pressed());
        assert!(values.borrow().is_empty());

        slider.handle_events(&[Event::PointerUp(Point::new(150, 10))]);
        assert_eq!(slider.value(), 0.75);
        assert_eq!(*values.borrow(), vec![0.75]);
    }

    #[test]
    fn release_off_track_does_nothing() {
        let (values, cb) = recorder();
        let mut slider = Slider::horizontal().with_rect(Rect::new(0, 0, 200, 20)).on_value_changed(cb);
        slider.handle_events(&[Event::PointerUp(Point::new(150, 40))]);
        assert!(values.borrow().is_empty());
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn vertical_uses_y() {
        let mut slider = Slider::vertical().with_rect(Rect::new(0, 0, 20, 100));
        slider.handle_events(&[Event::PointerUp(Point::new(10, 60))]);
        assert_eq!(slider.value(), 0.6);
    }

    // ── Paint ────────────────────────────────────────────────────────

    #[test]
    fn paint_track_then_thumb() {
        let mut slider = Slider::horizontal().with_rect(Rect::new(0, 0, 100, 20)).with_value(0.5);
        let mut surface = RecordingSurface::new(100, 20);
        slider.paint(&mut surface);
        insta::assert_snapshot!(surface.log(), @r"
        fill (0,5 100x10) #878787 r3
        stroke (0,5 100x10) #000000 w3 r3
        fill (40,0 20x20) #a7a7a7 r15
        stroke (40,0 20x20) #000000 w1 r15
        ");
    }
}
