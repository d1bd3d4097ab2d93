//! Display-only boxed text.

use crate::css::color::Color;
use crate::css::stylesheet::StyleSet;
use crate::css::styles::{Align, StyleRecord};
use crate::event::Event;
use crate::geometry::Rect;
use crate::render::Surface;
use crate::widget::paint::{draw_box, draw_caption};
use crate::widget::{Widget, WidgetBase};

/// A bordered field showing a line of text. There is no editing; callers
/// replace the text with [`set_text`](Self::set_text).
pub struct TextBox {
    base: WidgetBase,
    text: String,
}

impl TextBox {
    pub const SELECTOR: &'static str = "textbox";

    pub fn default_styles() -> StyleSet {
        StyleSet::new().with(
            Self::SELECTOR,
            StyleRecord::new()
                .with_bg(Color::WHITE)
                .with_border(1, 0)
                .with_align(Align::Start)
                .with_x_margin(4),
        )
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

impl Widget for TextBox {
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
