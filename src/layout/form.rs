//! Two-column form: a caption label beside each control.

use crate::css::stylesheet::StyleSet;
use crate::event::Event;
use crate::geometry::{Orientation, Rect};
use crate::layout::distribute::distribute;
use crate::render::Surface;
use crate::widget::{Element, Widget, WidgetBase};
use crate::widgets::Label;

/// One row of a [`FormLayout`].
pub struct FormRow {
    pub title: Label,
    pub control: Element,
    pub proportion: Option<f32>,
}

/// Rows stacked vertically with the same share rule as
/// [`BoxLayout`](crate::layout::BoxLayout); each row gives its title a fixed
/// width and the control the rest.
pub struct FormLayout {
    base: WidgetBase,
    title_width: i32,
    rows: Vec<FormRow>,
}

impl FormLayout {
    pub const DEFAULT_TITLE_WIDTH: i32 = 200;

    pub fn new() -> Self {
        Self { base: WidgetBase::new(StyleSet::new()), title_width: Self::DEFAULT_TITLE_WIDTH, rows: Vec::new() }
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.base.set_rect(rect);
        self
    }

    pub fn with_title_width(mut self, width: i32) -> Self {
        self.title_width = width.max(0);
        self
    }

    pub fn title_width(&self) -> i32 {
        self.title_width
    }

    /// Append a row sharing the remaining height equally.
    pub fn add_row(&mut self, title: &str, control: impl Into<Element>) {
        self.push(title, control.into(), None);
    }

    pub fn add_row_with_proportion(&mut self, title: &str, control: impl Into<Element>, proportion: f32) {
        self.push(title, control.into(), Some(proportion));
    }

    fn push(&mut self, title: &str, mut control: Element, proportion: Option<f32>) {
        let area = self.base.area();
        let mut title = Label::new(title);
        title.attach(area);
        control.attach(area);
        self.rows.push(FormRow { title, control, proportion });
    }

    pub fn rows(&self) -> &[FormRow] {
        &self.rows
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut FormRow> {
        self.rows.get_mut(index)
    }

    /// `(title, control)` rectangles per row.
    pub fn row_rects(&self) -> Vec<(Rect, Rect)> {
        let Some(area) = self.base.area() else {
            return Vec::new();
        };
        let proportions: Vec<Option<f32>> = self.rows.iter().map(|r| r.proportion).collect();
        distribute(area, Orientation::Vertical, &proportions)
            .into_iter()
            .map(|row| {
                let title_w = self.title_width.min(row.width.max(0));
                (
                    Rect::new(row.x, row.y, title_w, row.height),
                    Rect::new(row.x + title_w, row.y, row.width - title_w, row.height),
                )
            })
            .collect()
    }
}

impl Default for FormLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for FormLayout {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn geometry_changed(&mut self) {
        let area = self.base.area();
        for row in &mut self.rows {
            row.title.attach(area);
            row.control.attach(area);
        }
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        let rects = self.row_rects();
        for (row, (title_rect, control_rect)) in self.rows.iter_mut().zip(rects) {
            row.title.set_rect(title_rect);
            row.control.set_rect(control_rect);
            if row.title.is_visible() {
                row.title.paint(surface);
            }
            if row.control.is_visible() {
                row.control.paint(surface);
            }
        }
    }

    fn handle_events(&mut self, events: &[Event]) {
        for row in &mut self.rows {
            if row.title.is_visible() {
                row.title.handle_events(events);
            }
            if row.control.is_visible() {
                row.control.handle_events(events);
            }
        }
    }
}
