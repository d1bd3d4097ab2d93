//! Per-selector style records.
//!
//! A [`StyleRecord`] is the fully-populated style of one selector: every field
//! has a value from the moment the record is created, and stylesheet text
//! only ever overwrites individual fields.

use crate::css::color::Color;
use crate::image::Image;

/// Font family name plus point size. The surface resolves the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
    pub name: String,
    pub size: u16,
}

impl Font {
    pub const DEFAULT_NAME: &'static str = "freesansbold";
    pub const DEFAULT_SIZE: u16 = 14;

    pub fn new(name: impl Into<String>, size: u16) -> Self {
        Self { name: name.into(), size }
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new(Font::DEFAULT_NAME, Font::DEFAULT_SIZE)
    }
}

/// Horizontal text alignment inside a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    Start,
    #[default]
    Center,
    End,
}

impl Align {
    /// `left`/`start`, `center`, `right`/`end`.
    pub fn from_name(name: &str) -> Option<Align> {
        match name.to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Align::Start),
            "center" => Some(Align::Center),
            "right" | "end" => Some(Align::End),
            _ => None,
        }
    }
}

/// Resolved style of one selector.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRecord {
    pub font: Font,
    /// `None` paints no background.
    pub bg_color: Option<Color>,
    pub border_color: Color,
    pub border_radius: i32,
    pub border_width: i32,
    pub text_color: Color,
    pub x_margin: i32,
    pub y_margin: i32,
    /// Fixed width, used by menus, slider thumbs and list rows.
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub align: Align,
    /// Painted instead of the background color when set.
    pub image: Option<Image>,
}

impl StyleRecord {
    pub const DEFAULT_BACKGROUND: Color = Color::rgb(100, 100, 100);

    pub fn new() -> Self {
        Self {
            font: Font::default(),
            bg_color: Some(Self::DEFAULT_BACKGROUND),
            border_color: Color::BLACK,
            border_radius: 0,
            border_width: 0,
            text_color: Color::BLACK,
            x_margin: 0,
            y_margin: 0,
            width: None,
            height: None,
            align: Align::Center,
            image: None,
        }
    }

    // -- builder helpers used by widgets to declare their defaults ------------

    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg_color = Some(color);
        self
    }

    pub fn without_bg(mut self) -> Self {
        self.bg_color = None;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_border(mut self, width: i32, radius: i32) -> Self {
        self.border_width = width;
        self.border_radius = radius;
        self
    }

    pub fn with_radius(mut self, radius: i32) -> Self {
        self.border_radius = radius;
        self
    }

    pub fn with_width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_x_margin(mut self, margin: i32) -> Self {
        self.x_margin = margin;
        self
    }
}

impl Default for StyleRecord {
    fn default() -> Self {
        Self::new()
    }
}
