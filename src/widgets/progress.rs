//! Horizontal progress bar.

use crate::css::color::Color;
use crate::css::stylesheet::StyleSet;
use crate::css::styles::StyleRecord;
use crate::event::Event;
use crate::geometry::Rect;
use crate::render::Surface;
use crate::widget::paint::draw_box;
use crate::widget::{Widget, WidgetBase};

/// Fills `width * value` of its rectangle from the left.
pub struct ProgressBar {
    base: WidgetBase,
    value: f32,
}

impl ProgressBar {
    pub const OUTER: &'static str = "progressbar.outer";
    pub const INNER: &'static str = "progressbar.inner";

    pub fn default_styles() -> StyleSet {
        StyleSet::new()
            .with(Self::OUTER, StyleRecord::new().with_bg(Color::WHITE))
            .with(Self::INNER, StyleRecord::new().with_bg(Color::WHITE))
    }

    pub fn new() -> Self {
        Self { base: WidgetBase::new(Self::default_styles()), value: 0.0 }
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.base.set_rect(rect);
        self
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.set_value(value);
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Clamped to `[0, 1]`.
    pub fn set_value(&mut self, value: f32) {
        self.value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    }

    /// The filled part of `rect`.
    pub fn fill_rect(&self, rect: Rect) -> Rect {
        Rect::new(rect.x, rect.y, (rect.width as f32 * self.value) as i32, rect.height)
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ProgressBar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        let Some(rect) = self.base.rect() else { return };
        let styles = self.base.styles();
        draw_box(surface, rect, styles.resolve(Self::OUTER));
        let fill = self.fill_rect(rect);
        if fill.width > 0 {
            draw_box(surface, fill, styles.resolve(Self::INNER));
        }
    }

    fn handle_events(&mut self, _events: &[Event]) {}
}
