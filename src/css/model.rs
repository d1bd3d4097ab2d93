//! Stylesheet AST: Selector, Declaration, RuleSet, StyleSheet.

use std::fmt;

/// A dotted selector name such as `btn.hover` or `menu_bar`.
///
/// Selectors are opaque names: a widget declares which ones it understands by
/// pre-registering them in its [`StyleSet`](crate::css::stylesheet::StyleSet).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector(pub String);

impl Selector {
    /// Build from segments joined with `.`.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        let joined: Vec<&str> = segments.iter().map(AsRef::as_ref).collect();
        Selector(joined.join("."))
    }

    /// The selector text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value token within a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationValue {
    /// An identifier like `white`, `center`, `freesansbold`.
    Ident(String),
    /// A bare number like `10`, `2.5`.
    Number(f32),
    /// A number with a unit suffix like `20px`, `50%`.
    Dimension(f32, String),
    /// A hex color string (without the `#` prefix), e.g. `"a9a9a9"`.
    Color(String),
    /// A quoted string value (quotes stripped).
    String(String),
    /// The argument of `url(...)`, quotes stripped.
    Url(String),
}

impl DeclarationValue {
    /// Numeric value for `Number` and `px` dimensions.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            DeclarationValue::Number(n) => Some(*n),
            DeclarationValue::Dimension(n, unit) if unit == "px" => Some(*n),
            _ => None,
        }
    }

    /// Textual value for identifiers and strings.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DeclarationValue::Ident(s) | DeclarationValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A single `property: value ...` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name as written, e.g. `"background-color"`.
    pub property: String,
    pub values: Vec<DeclarationValue>,
}

impl Declaration {
    pub fn new(property: impl Into<String>, values: Vec<DeclarationValue>) -> Self {
        Self { property: property.into(), values }
    }
}

/// One or more selectors paired with declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

/// A parsed stylesheet: rule sets in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    pub rules: Vec<RuleSet>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Every `url(...)` argument in the sheet, in source order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.urls_where(|_, _| true)
    }

    /// `url(...)` arguments of the declarations `keep` accepts, in source order.
    pub fn urls_where<'a, F>(&'a self, keep: F) -> impl Iterator<Item = &'a str> + 'a
    where
        F: Fn(&RuleSet, &Declaration) -> bool + 'a,
    {
        self.rules
            .iter()
            .flat_map(|r| r.declarations.iter().map(move |d| (r, d)))
            .filter(move |(r, d)| keep(*r, *d))
            .flat_map(|(_, d)| d.values.iter())
            .filter_map(|v| match v {
                DeclarationValue::Url(u) => Some(u.as_str()),
                _ => None,
            })
    }
}
