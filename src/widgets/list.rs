//! Scrollable list of text rows with drag-to-scroll and click-to-select.

use crate::css::color::Color;
use crate::css::stylesheet::StyleSet;
use crate::css::styles::StyleRecord;
use crate::event::Event;
use crate::geometry::{Orientation, Point, Rect};
use crate::render::Surface;
use crate::widget::paint::{draw_box, draw_caption};
use crate::widget::{Widget, WidgetBase};

/// Vertical pointer travel needed before a press turns into a scroll.
pub const SCROLL_THRESHOLD: i32 = 5;
const ROW_HEIGHT: i32 = 20;
const OUTER_INSET: i32 = 5;

type SelectionCallback = Box<dyn FnMut(usize, &str)>;

pub struct List {
    base: WidgetBase,
    items: Vec<String>,
    first_visible: usize,
    hovered_item: Option<usize>,
    current_item: Option<usize>,
    hovered: bool,
    pressed: bool,
    scrolling: bool,
    anchor_y: i32,
    selection_changed: Option<SelectionCallback>,
}

impl List {
    pub const OUTER: &'static str = "list";
    pub const ITEM_NORMAL: &'static str = "list.item.normal";
    pub const ITEM_HOVER: &'static str = "list.item.hover";
    pub const ITEM_SELECTED: &'static str = "list.item.selected";
    /// Older name for the selected-row selector.
    pub const ITEM_PRESSED: &'static str = "list.item.pressed";

    pub fn default_styles() -> StyleSet {
        let row = |bg: Color| StyleRecord::new().with_bg(bg).with_height(ROW_HEIGHT);
        StyleSet::new()
            .with(Self::OUTER, StyleRecord::new())
            .with(Self::ITEM_NORMAL, row(Color::rgb(0xa7, 0xa7, 0xa7)))
            .with(Self::ITEM_HOVER, row(Color::rgb(0xc6, 0xc6, 0xc6)))
            .with(Self::ITEM_SELECTED, row(Color::rgb(0x56, 0x56, 0x56)))
            .with_alias(Self::ITEM_PRESSED, Self::ITEM_SELECTED)
    }

    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base: WidgetBase::new(Self::default_styles()),
            items: items.into_iter().map(Into::into).collect(),
            first_visible: 0,
            hovered_item: None,
            current_item: None,
            hovered: false,
            pressed: false,
            scrolling: false,
            anchor_y: 0,
            selection_changed: None,
        }
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.base.set_rect(rect);
        self
    }

    /// Called with the index and text of the newly selected row.
    pub fn on_selection_changed(mut self, callback: impl FnMut(usize, &str) + 'static) -> Self {
        self.selection_changed = Some(Box::new(callback));
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Replace the items; scroll position and selection are clamped.
    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self.first_visible = self.first_visible.min(self.last_index());
        self.current_item = self.current_item.filter(|&i| i < self.items.len());
        self.hovered_item = self.hovered_item.filter(|&i| i < self.items.len());
    }

    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// Make `index` the top row (clamped to the last item).
    pub fn scroll_to(&mut self, index: usize) {
        self.first_visible = index.min(self.last_index());
    }

    pub fn hovered_item(&self) -> Option<usize> {
        self.hovered_item
    }

    pub fn current_item(&self) -> Option<usize> {
        self.current_item
    }

    pub fn current_text(&self) -> Option<&str> {
        self.current_item.and_then(|i| self.items.get(i)).map(String::as_str)
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    fn last_index(&self) -> usize {
        self.items.len().saturating_sub(1)
    }

    fn row_height(&self) -> i32 {
        self.base.styles().resolve(Self::ITEM_NORMAL).height.unwrap_or(ROW_HEIGHT).max(1)
    }

    fn item_at(&self, rect: Rect, p: Point) -> Option<usize> {
        if self.items.is_empty() || !rect.contains(p) {
            return None;
        }
        let row = (p.y - rect.y).div_euclid(self.row_height()) as usize;
        Some((row + self.first_visible).min(self.last_index()))
    }

    fn process_event(&mut self, event: &Event) {
        let Some(rect) = self.base.rect() else { return };
        match *event {
            Event::PointerMove(p) => {
                self.hovered = rect.contains(p);
                self.hovered_item = self.item_at(rect, p);
                if self.pressed {
                    let dy = p.y - self.anchor_y;
                    if dy.abs() > SCROLL_THRESHOLD {
                        self.anchor_y = p.y;
                        self.scrolling = true;
                        if dy > 0 {
                            self.first_visible = self.first_visible.saturating_sub(1);
                        } else if self.first_visible < self.last_index() {
                            self.first_visible += 1;
                        }
                    }
                }
            }
            Event::PointerDown(p) => {
                self.hovered = rect.contains(p);
                if self.hovered {
                    self.pressed = true;
                    self.anchor_y = p.y;
                }
            }
            Event::PointerUp(_) => {
                self.pressed = false;
                if self.hovered && !self.scrolling {
                    if let Some(index) = self.hovered_item {
                        self.current_item = Some(index);
                        if let (Some(cb), Some(text)) = (self.selection_changed.as_mut(), self.items.get(index)) {
                            cb(index, text);
                        }
                    }
                }
                self.scrolling = false;
            }
            _ => {}
        }
    }
}

impl Widget for List {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        let Some(rect) = self.base.rect() else { return };
        let styles = self.base.styles();
        draw_box(surface, rect.inset_cross(Orientation::Horizontal, OUTER_INSET), styles.resolve(Self::OUTER));

        let row_height = self.row_height();
        let mut y = rect.y;
        for (index, text) in self.items.iter().enumerate().skip(self.first_visible) {
            if y + row_height > rect.bottom() {
                break;
            }
            let row = Rect::new(rect.x, y, rect.width, row_height);
            if Some(index) == self.hovered_item {
                let style = styles.resolve(Self::ITEM_HOVER);
                draw_box(surface, row, style);
                draw_caption(surface, row, style, text);
            } else if Some(index) == self.current_item {
                let style = styles.resolve(Self::ITEM_SELECTED);
                draw_box(surface, row, style);
                draw_caption(surface, row, style, text);
            } else {
                draw_caption(surface, row, styles.resolve(Self::ITEM_NORMAL), text);
            }
            y += row_height;
        }
    }

    fn handle_events(&mut self, events: &[Event]) {
        for event in events {
            self.process_event(event);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
