//! Color resolution: named colors and hex strings to RGBA.
//!
//! Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` and a table of common CSS
//! color names (case-insensitive, with or without underscores).

use std::fmt;
use std::str::FromStr;

/// An 8-bit RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color from components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Resolve a color name or hex string.
    ///
    /// Returns `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        named(&key)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Error returned by [`Color::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color: {0}")]
pub struct UnknownColor(pub String);

impl FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s).ok_or_else(|| UnknownColor(s.to_owned()))
    }
}

/// Parse hex digits (without `#`).
fn parse_hex(hex: &str) -> Option<Color> {
    let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Color::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn named(key: &str) -> Option<Color> {
    let c = match key {
        "black" => Color::rgb(0, 0, 0),
        "white" => Color::rgb(255, 255, 255),
        "red" => Color::rgb(255, 0, 0),
        "lime" => Color::rgb(0, 255, 0),
        "green" => Color::rgb(0, 128, 0),
        "blue" => Color::rgb(0, 0, 255),
        "yellow" => Color::rgb(255, 255, 0),
        "cyan" | "aqua" => Color::rgb(0, 255, 255),
        "magenta" | "fuchsia" => Color::rgb(255, 0, 255),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "darkgray" | "darkgrey" => Color::rgb(169, 169, 169),
        "lightgray" | "lightgrey" => Color::rgb(211, 211, 211),
        "dimgray" | "dimgrey" => Color::rgb(105, 105, 105),
        "silver" => Color::rgb(192, 192, 192),
        "maroon" => Color::rgb(128, 0, 0),
        "darkred" => Color::rgb(139, 0, 0),
        "olive" => Color::rgb(128, 128, 0),
        "darkgreen" => Color::rgb(0, 100, 0),
        "navy" => Color::rgb(0, 0, 128),
        "darkblue" => Color::rgb(0, 0, 139),
        "teal" => Color::rgb(0, 128, 128),
        "purple" => Color::rgb(128, 0, 128),
        "orange" => Color::rgb(255, 165, 0),
        "pink" => Color::rgb(255, 192, 203),
        "brown" => Color::rgb(165, 42, 42),
        "gold" => Color::rgb(255, 215, 0),
        "skyblue" => Color::rgb(135, 206, 235),
        "steelblue" => Color::rgb(70, 130, 180),
        "crimson" => Color::rgb(220, 20, 60),
        "indigo" => Color::rgb(75, 0, 130),
        "violet" => Color::rgb(238, 130, 238),
        "beige" => Color::rgb(245, 245, 220),
        "transparent" => Color::rgba(0, 0, 0, 0),
        _ => return None,
    };
    Some(c)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digit_hex() {
        assert_eq!(Color::parse("#a9a9a9"), Some(Color::rgb(169, 169, 169)));
        assert_eq!(Color::parse("#878787"), Some(Color::rgb(135, 135, 135)));
    }

    #[test]
    fn short_hex_expands() {
        assert_eq!(Color::parse("#fff"), Some(Color::WHITE));
        assert_eq!(Color::parse("#f008"), Some(Color::rgba(255, 0, 0, 136)));
    }

    #[test]
    fn eight_digit_hex_has_alpha() {
        assert_eq!(Color::parse("#11223344"), Some(Color::rgba(0x11, 0x22, 0x33, 0x44)));
    }

    #[test]
    fn names_are_case_and_separator_insensitive() {
        assert_eq!(Color::parse("White"), Some(Color::WHITE));
        assert_eq!(Color::parse("dark_gray"), Color::parse("darkgrey"));
        assert_eq!(Color::parse("light-gray"), Some(Color::rgb(211, 211, 211)));
    }

    #[test]
    fn unknown_inputs() {
        assert_eq!(Color::parse("#12"), None);
        assert_eq!(Color::parse("#gggggg"), None);
        assert_eq!(Color::parse("chartreuse-ish"), None);
        assert!("nope".parse::<Color>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let c = Color::rgb(1, 2, 3);
        assert_eq!(c.to_string(), "#010203");
        assert_eq!(Color::parse(&c.to_string()), Some(c));
        assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
    }
}
