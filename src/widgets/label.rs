//! Label widget: a styled box with a caption.

use crate::css::stylesheet::StyleSet;
use crate::css::styles::StyleRecord;
use crate::event::Event;
use crate::geometry::Rect;
use crate::render::Surface;
use crate::widget::paint::{draw_box, draw_caption};
use crate::widget::{Widget, WidgetBase};

/// Static text. Ignores input.
pub struct Label {
    base: WidgetBase,
    text: String,
}

impl Label {
    pub const SELECTOR: &'static str = "label";

    pub fn default_styles() -> StyleSet {
        StyleSet::new().with(Self::SELECTOR, StyleRecord::new())
    }

    pub fn new(text: impl Into<String>) -> Self {
        Self { base: WidgetBase::new(Self::default_styles()), text: text.into() }
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.base.set_rect(rect);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        let Some(rect) = self.base.rect() else { return };
        let style = self.base.styles().resolve(Self::SELECTOR);
        draw_box(surface, rect, style);
        draw_caption(surface, rect, style, &self.text);
    }

    fn handle_events(&mut self, _events: &[Event]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::color::Color;
    use crate::testing::RecordingSurface;

    #[test]
    fn paints_box_then_centered_text() {
        let mut label = Label::new("Hi").with_rect(Rect::new(0, 0, 10, 3));
        let mut surface = RecordingSurface::new(20, 5);
        label.paint(&mut surface);
        insta::assert_snapshot!(surface.log(), @r"
        fill (0,0 10x3) #646464 r0
        text (4,1) #000000 'Hi'
        ");
    }

    #[test]
    fn stylesheet_changes_label() {
        let mut label = Label::new("x");
        label.set_style_sheet("label { color: white; background-color: none; }").unwrap();
        let style = label.styles().resolve(Label::SELECTOR);
        assert_eq!(style.text_color, Color::WHITE);
        assert_eq!(style.bg_color, None);
    }

    #[test]
    fn detached_label_paints_nothing() {
        let mut label = Label::new("x");
        let mut surface = RecordingSurface::new(20, 5);
        label.paint(&mut surface);
        assert!(surface.ops().is_empty());
    }
}
