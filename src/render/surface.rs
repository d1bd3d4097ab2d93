//! The drawing capability widgets paint onto.

use std::io;

use crate::css::color::Color;
use crate::css::styles::Font;
use crate::geometry::{Point, Rect, Size};
use crate::image::Image;

/// A 2D drawing target.
///
/// Coordinates are surface units (pixels for a raster backend, cells for the
/// terminal backend). Drawing outside the surface is clipped by the
/// implementation, never an error.
pub trait Surface {
    /// Current drawable size.
    fn size(&self) -> Size;

    /// Called when the window reports a new size.
    fn resize(&mut self, _size: Size) {}

    /// Fill the whole surface.
    fn clear(&mut self, color: Color);

    /// Fill `rect`, rounding corners by `radius`.
    fn fill_rect(&mut self, rect: Rect, color: Color, radius: i32);

    /// Outline `rect` with a border `thickness` units wide.
    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: i32, radius: i32);

    /// The size `text` would occupy when drawn with `font`.
    fn measure_text(&self, text: &str, font: &Font) -> Size;

    /// Draw `text` with its top-left corner at `origin`; returns the drawn size.
    fn draw_text(&mut self, text: &str, font: &Font, color: Color, origin: Point) -> Size;

    /// Draw `image` at `dest`'s origin, stretched to `dest` when `scaled`.
    fn blit_image(&mut self, image: &Image, dest: Rect, scaled: bool);

    /// Make the frame visible.
    fn present(&mut self) -> io::Result<()>;

    fn set_title(&mut self, _title: &str) {}
}
