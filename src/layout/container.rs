//! Horizontal and vertical box layouts.

use crate::css::stylesheet::StyleSet;
use crate::event::Event;
use crate::geometry::{Orientation, Rect};
use crate::layout::distribute::distribute;
use crate::render::Surface;
use crate::widget::{Element, Widget, WidgetBase};

/// Lays children out side by side along one axis.
///
/// Child rectangles are recomputed from the layout's area on every paint.
/// A layout without a rectangle of its own uses its parent's.
pub struct BoxLayout {
    base: WidgetBase,
    orientation: Orientation,
    children: Vec<(Option<f32>, Element)>,
}

impl BoxLayout {
    pub fn new(orientation: Orientation) -> Self {
        Self { base: WidgetBase::new(StyleSet::new()), orientation, children: Vec::new() }
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.base.set_rect(rect);
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Append a child that shares the remaining space equally.
    pub fn add(&mut self, child: impl Into<Element>) {
        self.push(None, child.into());
    }

    /// Append a child with a fixed fraction of the primary axis.
    pub fn add_with_proportion(&mut self, child: impl Into<Element>, proportion: f32) {
        self.push(Some(proportion), child.into());
    }

    /// Builder form of [`add`](Self::add).
    pub fn with(mut self, child: impl Into<Element>) -> Self {
        self.add(child);
        self
    }

    fn push(&mut self, proportion: Option<f32>, mut child: Element) {
        child.attach(self.base.area());
        self.children.push((proportion, child));
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().map(|(_, c)| c)
    }

    pub fn child(&self, index: usize) -> Option<&Element> {
        self.children.get(index).map(|(_, c)| c)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.children.get_mut(index).map(|(_, c)| c)
    }

    /// Current child rectangles, or nothing without an area.
    pub fn child_rects(&self) -> Vec<Rect> {
        let Some(area) = self.base.area() else {
            return Vec::new();
        };
        let proportions: Vec<Option<f32>> = self.children.iter().map(|(p, _)| *p).collect();
        distribute(area, self.orientation, &proportions)
    }
}

impl Widget for BoxLayout {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn geometry_changed(&mut self) {
        let area = self.base.area();
        for (_, child) in &mut self.children {
            child.attach(area);
        }
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        let rects = self.child_rects();
        for ((_, child), rect) in self.children.iter_mut().zip(rects) {
            child.set_rect(rect);
            if child.is_visible() {
                child.paint(surface);
            }
        }
    }

    fn handle_events(&mut self, events: &[Event]) {
        for (_, child) in &mut self.children {
            if child.is_visible() {
                child.handle_events(events);
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::testing::RecordingSurface;
    use crate::widgets::{Button, Label};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn paint_assigns_child_rects() {
        let mut layout = BoxLayout::horizontal().with_rect(Rect::new(0, 0, 90, 30));
        layout.add(Label::new("a"));
        layout.add(Label::new("b"));
        layout.add_with_proportion(Label::new("c"), 0.5);

        let mut surface = RecordingSurface::new(100, 100);
        layout.paint(&mut surface);

        let rects: Vec<_> = layout.children().map(|c| c.rect()).collect();
        assert_eq!(
            rects,
            vec![Some(Rect::new(0, 0, 22, 30)), Some(Rect::new(22, 0, 22, 30)), Some(Rect::new(44, 0, 45, 30))]
        );
    }

    #[test]
    fn layout_without_rect_uses_parent() {
        let mut layout = BoxLayout::vertical().with(Label::new("a")).with(Label::new("b"));
        let mut surface = RecordingSurface::new(100, 100);
        layout.paint(&mut surface);
        assert!(surface.ops().is_empty());

        layout.attach(Some(Rect::new(0, 20, 100, 80)));
        layout.paint(&mut surface);
        assert_eq!(layout.child(1).and_then(Element::rect), Some(Rect::new(0, 60, 100, 40)));
    }

    #[test]
    fn nested_layouts() {
        let inner = BoxLayout::vertical().with(Label::new("top")).with(Label::new("bottom"));
        let mut outer = BoxLayout::horizontal().with_rect(Rect::new(0, 0, 200, 100));
        outer.add(Label::new("left"));
        outer.add(inner);

        let mut surface = RecordingSurface::new(200, 100);
        outer.paint(&mut surface);

        let Some(Element::Layout(inner)) = outer.child(1) else {
            panic!("expected nested layout");
        };
        assert_eq!(inner.child(1).and_then(Element::rect), Some(Rect::new(100, 50, 100, 50)));
    }

    #[test]
    fn invisible_children_get_no_events() {
        let clicks = Rc::new(Cell::new(0));
        let mut layout = BoxLayout::horizontal().with_rect(Rect::new(0, 0, 100, 50));
        let c = clicks.clone();
        layout.add(Button::new("ok").on_clicked(move || c.set(c.get() + 1)));
        let mut surface = RecordingSurface::new(100, 50);
        layout.paint(&mut surface);

        layout.handle_events(&[Event::PointerDown(Point::new(10, 10))]);
        assert_eq!(clicks.get(), 1);

        if let Some(child) = layout.child_mut(0) {
            child.set_visible(false);
        }
        layout.handle_events(&[Event::PointerDown(Point::new(10, 10))]);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn empty_layout_is_noop() {
        let mut layout = BoxLayout::horizontal().with_rect(Rect::new(0, 0, 10, 10));
        let mut surface = RecordingSurface::new(10, 10);
        layout.paint(&mut surface);
        layout.handle_events(&[Event::PointerDown(Point::new(1, 1))]);
        assert!(layout.is_empty());
        assert!(surface.ops().is_empty());
    }
}
