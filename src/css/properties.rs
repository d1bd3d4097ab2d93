//! Property parsing: declaration values → typed [`StyleRecord`] fields.
//!
//! The set of properties is closed. Anything that does not name a
//! [`Property`] is dropped before it reaches [`apply_declaration`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::css::color::Color;
use crate::css::model::DeclarationValue;
use crate::css::styles::{Align, StyleRecord};
use crate::image::Image;

/// Errors from property parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: Property, message: String },
}

/// Every property a stylesheet can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Width,
    Height,
    Color,
    BackgroundColor,
    BackgroundImage,
    BorderSize,
    BorderRadius,
    BorderColor,
    XMargin,
    YMargin,
    Align,
    FontSize,
    FontName,
}

impl Property {
    pub const ALL: [Property; 13] = [
        Property::Width,
        Property::Height,
        Property::Color,
        Property::BackgroundColor,
        Property::BackgroundImage,
        Property::BorderSize,
        Property::BorderRadius,
        Property::BorderColor,
        Property::XMargin,
        Property::YMargin,
        Property::Align,
        Property::FontSize,
        Property::FontName,
    ];

    /// The name as written in stylesheets.
    pub fn name(self) -> &'static str {
        match self {
            Property::Width => "width",
            Property::Height => "height",
            Property::Color => "color",
            Property::BackgroundColor => "background-color",
            Property::BackgroundImage => "background-image",
            Property::BorderSize => "border-size",
            Property::BorderRadius => "border-radius",
            Property::BorderColor => "border-color",
            Property::XMargin => "x-margin",
            Property::YMargin => "y-margin",
            Property::Align => "align",
            Property::FontSize => "font-size",
            Property::FontName => "font-name",
        }
    }

    pub fn from_name(name: &str) -> Option<Property> {
        Property::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::from_name(s).ok_or_else(|| PropertyError::UnknownProperty(s.to_owned()))
    }
}

/// Images already fetched for the stylesheet being applied, keyed by the
/// `url(...)` argument. A url absent from the map was skipped.
pub type ResolvedImages = HashMap<String, Image>;

fn invalid(property: Property, message: impl Into<String>) -> PropertyError {
    PropertyError::InvalidValue { property, message: message.into() }
}

/// A single non-negative integer (bare number or `px`).
fn require_length(values: &[DeclarationValue], property: Property) -> Result<i32, PropertyError> {
    match values {
        [v] => match v.as_number() {
            Some(n) if n >= 0.0 => Ok(n as i32),
            Some(n) => Err(invalid(property, format!("expected a non-negative length, got {n}"))),
            None => Err(invalid(property, format!("expected a number, got: {v:?}"))),
        },
        _ => Err(invalid(property, format!("expected 1 value, got {}", values.len()))),
    }
}

/// A color name or hex color.
fn require_color(values: &[DeclarationValue], property: Property) -> Result<Color, PropertyError> {
    let text = match values {
        [DeclarationValue::Ident(name)] => name.clone(),
        [DeclarationValue::Color(hex)] => format!("#{hex}"),
        [other] => return Err(invalid(property, format!("expected a color, got: {other:?}"))),
        _ => return Err(invalid(property, format!("expected 1 color value, got {}", values.len()))),
    };
    Color::parse(&text).ok_or_else(|| invalid(property, format!("unknown color: {text}")))
}

/// Apply one declaration to `record`.
///
/// `background-image` urls are looked up in `images`; a url that is missing
/// there leaves the record unchanged.
pub fn apply_declaration(
    record: &mut StyleRecord,
    property: Property,
    values: &[DeclarationValue],
    images: &ResolvedImages,
) -> Result<(), PropertyError> {
    match property {
        Property::Width => record.width = Some(require_length(values, property)?),
        Property::Height => record.height = Some(require_length(values, property)?),
        Property::Color => record.text_color = require_color(values, property)?,
        Property::BackgroundColor => {
            record.bg_color = match values {
                [DeclarationValue::Ident(name)]
                    if name.eq_ignore_ascii_case("none") || name.eq_ignore_ascii_case("transparent") =>
                {
                    None
                }
                _ => Some(require_color(values, property)?),
            };
        }
        Property::BackgroundImage => match values {
            [DeclarationValue::Url(url)] => {
                if let Some(image) = images.get(url) {
                    record.image = Some(image.clone());
                }
            }
            [DeclarationValue::Ident(name)] if name.eq_ignore_ascii_case("none") => record.image = None,
            _ => return Err(invalid(property, "expected url(...) or none")),
        },
        Property::BorderSize => record.border_width = require_length(values, property)?,
        Property::BorderRadius => record.border_radius = require_length(values, property)?,
        Property::BorderColor => record.border_color = require_color(values, property)?,
        Property::XMargin => record.x_margin = require_length(values, property)?,
        Property::YMargin => record.y_margin = require_length(values, property)?,
        Property::Align => {
            record.align = match values {
                [v] => v
                    .as_text()
                    .and_then(Align::from_name)
                    .ok_or_else(|| invalid(property, format!("expected left|center|right, got: {v:?}")))?,
                _ => return Err(invalid(property, format!("expected 1 value, got {}", values.len()))),
            };
        }
        Property::FontSize => {
            let size = require_length(values, property)?;
            record.font.size = u16::try_from(size).map_err(|_| invalid(property, "font size out of range"))?;
        }
        Property::FontName => {
            let words: Option<Vec<&str>> = values.iter().map(DeclarationValue::as_text).collect();
            match words {
                Some(words) if !words.is_empty() => record.font.name = words.join(" "),
                _ => return Err(invalid(property, "expected a font name")),
            }
        }
    }
    Ok(())
}
