//! Style sets: the per-widget selector → record table and the loader that
//! overlays stylesheet text onto it.
//!
//! Applying text is a two-phase operation. Every `url(...)` in the text is
//! fetched through the loader's [`ImageSource`] first; assignment only starts
//! once that phase has finished, so a fatal image failure leaves the set
//! exactly as it was.

use std::fmt;

use crate::css::parser::{parse_stylesheet, ParseError};
use crate::css::properties::{apply_declaration, Property, ResolvedImages};
use crate::css::styles::StyleRecord;
use crate::image::{self, ImageError, ImageSource, ImageUrl};

/// The selector every style set carries.
pub const BASE_SELECTOR: &str = "widget";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from applying stylesheet text.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("stylesheet syntax error: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to load image {url}: {source}")]
    Image {
        url: String,
        #[source]
        source: ImageError,
    },
}

// ---------------------------------------------------------------------------
// StyleLoader
// ---------------------------------------------------------------------------

/// What to do when a `background-image` cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFailure {
    /// Abort: nothing from the text is applied and the error is returned.
    #[default]
    Fatal,
    /// Drop the failing `background-image` and apply everything else.
    Skip,
}

/// Image source plus failure policy used while applying stylesheets.
pub struct StyleLoader {
    source: Box<dyn ImageSource>,
    failure: ImageFailure,
}

impl StyleLoader {
    pub fn new(source: impl ImageSource + 'static) -> Self {
        Self { source: Box::new(source), failure: ImageFailure::default() }
    }

    /// Set the failure policy.
    pub fn with_failure(mut self, failure: ImageFailure) -> Self {
        self.failure = failure;
        self
    }

    pub fn failure(&self) -> ImageFailure {
        self.failure
    }

    pub fn source(&self) -> &dyn ImageSource {
        self.source.as_ref()
    }

    /// Fetch every url referenced by `urls`, deduplicated.
    fn resolve<'a>(&self, urls: impl Iterator<Item = &'a str>) -> Result<ResolvedImages, StyleError> {
        let mut images = ResolvedImages::new();
        let mut failed: Vec<&str> = Vec::new();
        for url in urls {
            if images.contains_key(url) || failed.contains(&url) {
                continue;
            }
            match self.source.load(&ImageUrl::parse(url)) {
                Ok(image) => {
                    images.insert(url.to_owned(), image);
                }
                Err(source) => match self.failure {
                    ImageFailure::Fatal => {
                        return Err(StyleError::Image { url: url.to_owned(), source });
                    }
                    ImageFailure::Skip => {
                        tracing::warn!(target: "trellis::css", url, error = %source, "skipping background image");
                        failed.push(url);
                    }
                },
            }
        }
        Ok(images)
    }
}

impl Default for StyleLoader {
    fn default() -> Self {
        Self { source: image::default_source(), failure: ImageFailure::default() }
    }
}

impl fmt::Debug for StyleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleLoader").field("failure", &self.failure).finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// StyleSet
// ---------------------------------------------------------------------------

/// Ordered selector → [`StyleRecord`] table owned by one widget.
///
/// The base selector `widget` is always present. Selectors are registered up
/// front by the widget; stylesheet rules for any other selector are dropped.
/// An alias is a second name for a registered selector and shares its record.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSet {
    base: StyleRecord,
    named: Vec<(String, StyleRecord)>,
    aliases: Vec<(String, String)>,
}

impl StyleSet {
    /// A set holding only the base selector with default values.
    pub fn new() -> Self {
        Self { base: StyleRecord::new(), named: Vec::new(), aliases: Vec::new() }
    }

    /// Register `selector` with its default record (builder form).
    pub fn with(mut self, selector: &str, record: StyleRecord) -> Self {
        self.register(selector, record);
        self
    }

    /// Register `selector`, replacing the record if it already exists.
    pub fn register(&mut self, selector: &str, record: StyleRecord) {
        if let Some(existing) = self.get_mut(selector) {
            *existing = record;
        } else {
            self.named.push((selector.to_owned(), record));
        }
    }

    /// Make `alias` another name for the registered selector `target` (builder form).
    pub fn with_alias(mut self, alias: &str, target: &str) -> Self {
        self.aliases.push((alias.to_owned(), target.to_owned()));
        self
    }

    fn named_index(&self, selector: &str) -> Option<usize> {
        let target = self
            .aliases
            .iter()
            .find(|(alias, _)| alias == selector)
            .map_or(selector, |(_, target)| target.as_str());
        self.named.iter().position(|(name, _)| name == target)
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.get(selector).is_some()
    }

    pub fn get(&self, selector: &str) -> Option<&StyleRecord> {
        if selector == BASE_SELECTOR {
            return Some(&self.base);
        }
        self.named_index(selector).map(|i| &self.named[i].1)
    }

    pub fn get_mut(&mut self, selector: &str) -> Option<&mut StyleRecord> {
        if selector == BASE_SELECTOR {
            return Some(&mut self.base);
        }
        let i = self.named_index(selector)?;
        Some(&mut self.named[i].1)
    }

    /// The record for `selector`, or the base record when it is not registered.
    pub fn resolve(&self, selector: &str) -> &StyleRecord {
        self.get(selector).unwrap_or(&self.base)
    }

    /// The base (`widget`) record.
    pub fn base(&self) -> &StyleRecord {
        &self.base
    }

    /// Selector names in registration order, base first, aliases last.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        std::iter::once(BASE_SELECTOR)
            .chain(self.named.iter().map(|(name, _)| name.as_str()))
            .chain(self.aliases.iter().map(|(alias, _)| alias.as_str()))
    }

    /// Overlay stylesheet `text` using `loader` for images.
    ///
    /// Properties not mentioned in `text` keep their values. Unknown selectors
    /// and properties are ignored, as are declarations whose values do not
    /// fit the property.
    pub fn apply(&mut self, text: &str, loader: &StyleLoader) -> Result<(), StyleError> {
        let sheet = parse_stylesheet(text)?;
        // Only images this set could actually receive are fetched.
        let images = loader.resolve(sheet.urls_where(|rule, decl| {
            Property::from_name(&decl.property) == Some(Property::BackgroundImage)
                && rule.selectors.iter().any(|selector| self.contains(selector.as_str()))
        }))?;

        for rule in &sheet.rules {
            for selector in &rule.selectors {
                let Some(record) = self.get_mut(selector.as_str()) else {
                    tracing::trace!(target: "trellis::css", %selector, "ignoring unknown selector");
                    continue;
                };
                for decl in &rule.declarations {
                    let Some(property) = Property::from_name(&decl.property) else {
                        tracing::trace!(target: "trellis::css", property = %decl.property, "ignoring unknown property");
                        continue;
                    };
                    if let Err(err) = apply_declaration(record, property, &decl.values, &images) {
                        tracing::debug!(target: "trellis::css", %selector, error = %err, "ignoring declaration");
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for StyleSet {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::color::Color;
    use crate::image::{Image, MemoryImageSource};
    use pretty_assertions::assert_eq;

    fn button_set() -> StyleSet {
        StyleSet::new()
            .with("btn.normal", StyleRecord::new().with_bg(Color::rgb(0x87, 0x87, 0x87)))
            .with("btn.hover", StyleRecord::new().with_bg(Color::rgb(0xa9, 0xa9, 0xa9)))
            .with("btn.pressed", StyleRecord::new().with_bg(Color::rgb(0x56, 0x56, 0x56)))
    }

    fn memory_loader() -> StyleLoader {
        StyleLoader::new(MemoryImageSource::new().with_image("ok.png", Image::solid(2, 2, Color::WHITE)))
    }

    // ── Registration ────────────────────────────────────────────────

    #[test]
    fn base_selector_always_present() {
        let set = StyleSet::new();
        assert!(set.contains("widget"));
        assert_eq!(set.selectors().collect::<Vec<_>>(), vec!["widget"]);
        assert_eq!(button_set().selectors().count(), 4);
    }

    #[test]
    fn resolve_falls_back_to_base() {
        let set = button_set();
        assert_eq!(set.resolve("nope"), set.base());
        assert_eq!(set.resolve("btn.hover").bg_color, Some(Color::rgb(0xa9, 0xa9, 0xa9)));
    }

    #[test]
    fn alias_shares_the_target_record() {
        let mut set = button_set().with_alias("btn.down", "btn.pressed");
        assert!(set.contains("btn.down"));
        assert_eq!(set.selectors().last(), Some("btn.down"));
        set.apply("btn.down { color: white }", &memory_loader()).unwrap();
        assert_eq!(set.get("btn.pressed").unwrap().text_color, Color::WHITE);
        assert_eq!(set.get("btn.down"), set.get("btn.pressed"));
    }

    // ── Overlay ──────────────────────────────────────────────────────

    #[test]
    fn overlay_touches_only_named_selector() {
        let mut set = button_set();
        let before = set.clone();
        set.apply("btn.hover{background-color:#ff0000;}", &memory_loader()).unwrap();

        assert_eq!(set.get("btn.hover").unwrap().bg_color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(set.get("btn.normal"), before.get("btn.normal"));
        assert_eq!(set.get("btn.pressed"), before.get("btn.pressed"));
        assert_eq!(set.get("widget"), before.get("widget"));
    }

    #[test]
    fn overlay_is_sparse_across_calls() {
        let mut set = button_set();
        let loader = memory_loader();
        set.apply("btn.normal { color: white; }", &loader).unwrap();
        set.apply("btn.normal { border-size: 2; }", &loader).unwrap();
        let r = set.get("btn.normal").unwrap();
        assert_eq!(r.text_color, Color::WHITE);
        assert_eq!(r.border_width, 2);
    }

    #[test]
    fn unknown_selectors_and_properties_are_ignored() {
        let mut set = button_set();
        let before = set.clone();
        set.apply("slider.outer { color: red; } btn.hover { padding: 4; }", &memory_loader())
            .unwrap();
        assert_eq!(set, before);
    }

    #[test]
    fn images_under_unknown_selectors_are_never_fetched() {
        let mut set = button_set();
        set.apply(
            "list { background-image: url(gone.png) } btn.hover { background-color: red }",
            &memory_loader(),
        )
        .unwrap();
        assert_eq!(set.get("btn.hover").unwrap().bg_color, Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn only_background_image_urls_are_fetched() {
        let mut set = button_set();
        set.apply("btn.normal { font-name: url(gone.png); color: white }", &memory_loader()).unwrap();
        assert_eq!(set.get("btn.normal").unwrap().text_color, Color::WHITE);
    }

    #[test]
    fn selector_list_with_one_known_name_fetches() {
        let mut set = button_set();
        let err = set.apply("list, btn.hover { background-image: url(gone.png) }", &memory_loader()).unwrap_err();
        assert!(matches!(err, StyleError::Image { ref url, .. } if url == "gone.png"));
    }

    #[test]
    fn bad_value_does_not_abort_sheet() {
        let mut set = button_set();
        set.apply("btn.hover { width: red; color: white; }", &memory_loader()).unwrap();
        let r = set.get("btn.hover").unwrap();
        assert_eq!(r.width, None);
        assert_eq!(r.text_color, Color::WHITE);
    }

    #[test]
    fn selector_list_applies_to_each() {
        let mut set = button_set();
        set.apply("btn.normal, btn.pressed { border-radius: 4 }", &memory_loader()).unwrap();
        assert_eq!(set.get("btn.normal").unwrap().border_radius, 4);
        assert_eq!(set.get("btn.pressed").unwrap().border_radius, 4);
        assert_eq!(set.get("btn.hover").unwrap().border_radius, 0);
    }

    #[test]
    fn syntax_error_is_returned() {
        let mut set = button_set();
        let err = set.apply("btn.hover { color: red;", &memory_loader()).unwrap_err();
        assert!(matches!(err, StyleError::Parse(_)));
    }

    // ── Images ───────────────────────────────────────────────────────

    #[test]
    fn background_image_is_assigned() {
        let mut set = button_set();
        set.apply("btn.normal { background-image: url('ok.png'); }", &memory_loader()).unwrap();
        assert_eq!(set.get("btn.normal").unwrap().image.as_ref().map(Image::width), Some(2));
    }

    #[test]
    fn fatal_image_failure_applies_nothing() {
        let mut set = button_set();
        let before = set.clone();
        let err = set
            .apply(
                "btn.normal { color: white; } btn.hover { background-image: url(missing.png); }",
                &memory_loader(),
            )
            .unwrap_err();
        assert!(matches!(err, StyleError::Image { ref url, .. } if url == "missing.png"));
        assert_eq!(set, before);
    }

    #[test]
    fn skipped_image_failure_applies_the_rest() {
        let mut set = button_set();
        let loader = memory_loader().with_failure(ImageFailure::Skip);
        set.apply(
            "btn.normal { color: white; } btn.hover { background-image: url(missing.png); color: red; }",
            &loader,
        )
        .unwrap();
        assert_eq!(set.get("btn.normal").unwrap().text_color, Color::WHITE);
        let hover = set.get("btn.hover").unwrap();
        assert!(hover.image.is_none());
        assert_eq!(hover.text_color, Color::rgb(255, 0, 0));
    }
}
