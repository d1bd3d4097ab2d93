//! Shared paint helpers: styled boxes and aligned captions.

use crate::css::styles::{Align, StyleRecord};
use crate::geometry::{Point, Rect, Size};
use crate::render::Surface;

/// Background (image when set, else color) followed by the border.
pub fn draw_box(surface: &mut dyn Surface, rect: Rect, style: &StyleRecord) {
    match (&style.image, style.bg_color) {
        (Some(image), _) => surface.blit_image(image, rect, true),
        (None, Some(bg)) => surface.fill_rect(rect, bg, style.border_radius),
        (None, None) => {}
    }
    if style.border_width > 0 {
        surface.stroke_rect(rect, style.border_color, style.border_width, style.border_radius);
    }
}

/// Where text of `text_size` goes inside `rect`.
///
/// Vertically centered; horizontally per `style.align`, with `x_margin`
/// applied on the aligned edge.
pub fn text_origin(rect: Rect, text_size: Size, style: &StyleRecord) -> Point {
    let x = match style.align {
        Align::Center => rect.x + rect.width.div_euclid(2) - text_size.width.div_euclid(2),
        Align::Start => rect.x + style.x_margin,
        Align::End => rect.x + rect.width - text_size.width - style.x_margin,
    };
    let y = rect.y + rect.height.div_euclid(2) - text_size.height.div_euclid(2);
    Point::new(x, y)
}

/// Draw `text` aligned inside `rect` using the style's font and text color.
pub fn draw_caption(surface: &mut dyn Surface, rect: Rect, style: &StyleRecord, text: &str) {
    if text.is_empty() {
        return;
    }
    let size = surface.measure_text(text, &style.font);
    let origin = text_origin(rect, size, style);
    surface.draw_text(text, &style.font, style.text_color, origin);
}
