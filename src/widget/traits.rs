//! The `Widget` trait and the state every widget shares.
//!
//! A widget owns its rectangle, visibility flag and [`StyleSet`]. Parents
//! hand their own rectangle down through [`Widget::attach`]; a widget without
//! a rectangle of its own adopts the parent's and keeps following it until
//! it is given an explicit one.

use crate::css::stylesheet::{StyleError, StyleLoader, StyleSet};
use crate::event::Event;
use crate::geometry::{BoundingBox, Point, Rect, Size};
use crate::render::Surface;

// ---------------------------------------------------------------------------
// WidgetBase
// ---------------------------------------------------------------------------

/// Geometry, visibility and styles shared by all widgets.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    rect: Option<Rect>,
    /// The rectangle was adopted from the parent, not set explicitly.
    inherited: bool,
    visible: bool,
    styles: StyleSet,
    parent_rect: Option<Rect>,
}

impl WidgetBase {
    pub fn new(styles: StyleSet) -> Self {
        Self { rect: None, inherited: false, visible: true, styles, parent_rect: None }
    }

    /// Start with an explicit rectangle.
    pub fn with_rect(mut self, rect: Option<Rect>) -> Self {
        self.rect = rect;
        self
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    /// The widget's rectangle, or the parent's when it has none.
    pub fn area(&self) -> Option<Rect> {
        self.rect.or(self.parent_rect)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = Some(rect);
        self.inherited = false;
    }

    pub fn parent_rect(&self) -> Option<Rect> {
        self.parent_rect
    }

    /// Record the parent's rectangle and adopt it if this widget has none.
    pub fn attach(&mut self, parent_rect: Option<Rect>) {
        self.parent_rect = parent_rect;
        if self.rect.is_none() || self.inherited {
            self.rect = parent_rect;
            self.inherited = parent_rect.is_some();
        }
    }

    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn styles(&self) -> &StyleSet {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleSet {
        &mut self.styles
    }
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by every widget.
///
/// Object-safe: containers hold `dyn Widget` where they need to. `paint` may
/// recompute child geometry but never touches interaction state; only
/// `handle_events` does.
pub trait Widget {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Draw the widget (and its children) onto `surface`.
    fn paint(&mut self, surface: &mut dyn Surface);

    /// Process one frame's event batch, in order.
    fn handle_events(&mut self, events: &[Event]);

    /// Called after the rectangle or styles change.
    fn geometry_changed(&mut self) {}

    fn rect(&self) -> Option<Rect> {
        self.base().rect()
    }

    fn set_rect(&mut self, rect: Rect) {
        self.base_mut().set_rect(rect);
        self.geometry_changed();
    }

    /// Move the widget, keeping its size. A widget with no rectangle gets an
    /// empty one at `position`.
    fn set_position(&mut self, position: Point) {
        let rect = self.rect().unwrap_or(Rect::EMPTY).with_origin(position);
        self.set_rect(rect);
    }

    /// Resize the widget, keeping its origin. A widget with no rectangle gets
    /// one anchored at `(0, 0)`.
    fn set_size(&mut self, size: Size) {
        let rect = self.rect().unwrap_or(Rect::EMPTY).with_size(size);
        self.set_rect(rect);
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        self.rect().map(Rect::bounding_box)
    }

    /// Hand the parent's rectangle down. Containers forward to their children.
    fn attach(&mut self, parent_rect: Option<Rect>) {
        self.base_mut().attach(parent_rect);
        self.geometry_changed();
    }

    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.base_mut().set_visible(visible);
    }

    fn styles(&self) -> &StyleSet {
        self.base().styles()
    }

    /// Overlay stylesheet text, loading images with the default loader.
    fn set_style_sheet(&mut self, text: &str) -> Result<(), StyleError> {
        self.set_style_sheet_with(text, &StyleLoader::default())
    }

    fn set_style_sheet_with(&mut self, text: &str, loader: &StyleLoader) -> Result<(), StyleError> {
        self.base_mut().styles_mut().apply(text, loader)?;
        self.geometry_changed();
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_adopts_parent_rect_when_unset() {
        let mut base = WidgetBase::new(StyleSet::new());
        base.attach(Some(Rect::new(0, 20, 100, 80)));
        assert_eq!(base.rect(), Some(Rect::new(0, 20, 100, 80)));
        assert!(base.is_inherited());

        base.attach(Some(Rect::new(0, 20, 200, 180)));
        assert_eq!(base.rect(), Some(Rect::new(0, 20, 200, 180)));
    }

    #[test]
    fn explicit_rect_survives_attach() {
        let mut base = WidgetBase::new(StyleSet::new());
        base.set_rect(Rect::new(5, 5, 10, 10));
        base.attach(Some(Rect::new(0, 0, 100, 100)));
        assert_eq!(base.rect(), Some(Rect::new(5, 5, 10, 10)));
        assert_eq!(base.parent_rect(), Some(Rect::new(0, 0, 100, 100)));
        assert!(!base.is_inherited());
    }

    #[test]
    fn area_falls_back_to_parent() {
        let mut base = WidgetBase::new(StyleSet::new());
        assert_eq!(base.area(), None);
        base.attach(None);
        assert_eq!(base.area(), None);
        base.attach(Some(Rect::new(1, 2, 3, 4)));
        assert_eq!(base.area(), Some(Rect::new(1, 2, 3, 4)));
    }
}
