//! Items stacked below an open menu: actions and separators.

use crate::css::stylesheet::StyleSet;
use crate::event::Event;
use crate::geometry::Rect;
use crate::render::Surface;
use crate::widget::paint::draw_box;
use crate::widget::{Widget, WidgetBase};
use crate::widgets::{Button, ButtonSignal};

const DEFAULT_WIDTH: i32 = 100;
const ACTION_HEIGHT: i32 = 20;
const SEPARATOR_HEIGHT: i32 = 1;

/// Rectangle at `(x, y)` sized by the `widget` style, or the given defaults.
fn stacked_rect(styles: &StyleSet, x: i32, y: i32, default_height: i32) -> Rect {
    let base = styles.base();
    Rect::new(x, y, base.width.unwrap_or(DEFAULT_WIDTH), base.height.unwrap_or(default_height))
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A clickable menu item.
pub struct Action {
    button: Button,
    triggered: Option<Box<dyn FnMut()>>,
}

impl Action {
    pub fn new(caption: impl Into<String>) -> Self {
        Self { button: Button::with_styles(caption, Button::styles_with_radius(0)), triggered: None }
    }

    /// Called when the item is clicked.
    pub fn on_triggered(mut self, callback: impl FnMut() + 'static) -> Self {
        self.triggered = Some(Box::new(callback));
        self
    }

    pub fn caption(&self) -> &str {
        self.button.text()
    }

    pub fn button(&self) -> &Button {
        &self.button
    }

    /// Drop hover and press state left over from the last time the menu was open.
    pub fn reset_interaction(&mut self) {
        self.button.reset_interaction();
    }

    /// Place the item at `(x, y)`; returns where the next item goes.
    pub fn prepare(&mut self, x: i32, y: i32) -> (i32, i32) {
        let rect = stacked_rect(self.button.styles(), x, y, ACTION_HEIGHT);
        self.button.set_rect(rect);
        (x, y + rect.height)
    }
}

impl Widget for Action {
    fn base(&self) -> &WidgetBase {
        self.button.base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.button.base_mut()
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        self.button.paint(surface);
    }

    fn handle_events(&mut self, events: &[Event]) {
        for event in events {
            if self.button.process_event(event) == Some(ButtonSignal::Clicked) {
                tracing::debug!(target: "trellis::app", action = self.button.text(), "menu action triggered");
                if let Some(cb) = self.triggered.as_mut() {
                    cb();
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MenuSeparator
// ---------------------------------------------------------------------------

/// A thin bar between groups of actions, painted with its `widget` style.
pub struct MenuSeparator {
    base: WidgetBase,
}

impl MenuSeparator {
    pub fn new() -> Self {
        Self { base: WidgetBase::new(StyleSet::new()) }
    }

    pub fn prepare(&mut self, x: i32, y: i32) -> (i32, i32) {
        let rect = stacked_rect(self.base.styles(), x, y, SEPARATOR_HEIGHT);
        self.set_rect(rect);
        (x, y + rect.height)
    }
}

impl Default for MenuSeparator {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for MenuSeparator {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        if let Some(rect) = self.base.rect() {
            draw_box(surface, rect, self.base.styles().base());
        }
    }

    fn handle_events(&mut self, _events: &[Event]) {}
}

// ---------------------------------------------------------------------------
// MenuEntry
// ---------------------------------------------------------------------------

/// One item of a [`Menu`](super::Menu).
pub enum MenuEntry {
    Action(Action),
    Separator(MenuSeparator),
}

impl MenuEntry {
    pub fn prepare(&mut self, x: i32, y: i32) -> (i32, i32) {
        match self {
            MenuEntry::Action(a) => a.prepare(x, y),
            MenuEntry::Separator(s) => s.prepare(x, y),
        }
    }

    pub fn reset_interaction(&mut self) {
        if let MenuEntry::Action(a) = self {
            a.reset_interaction();
        }
    }

    pub fn as_action(&self) -> Option<&Action> {
        match self {
            MenuEntry::Action(a) => Some(a),
            MenuEntry::Separator(_) => None,
        }
    }

    fn widget(&self) -> &dyn Widget {
        match self {
            MenuEntry::Action(a) => a,
            MenuEntry::Separator(s) => s,
        }
    }

    fn widget_mut(&mut self) -> &mut dyn Widget {
        match self {
            MenuEntry::Action(a) => a,
            MenuEntry::Separator(s) => s,
        }
    }
}

impl From<Action> for MenuEntry {
    fn from(action: Action) -> Self {
        MenuEntry::Action(action)
    }
}

impl From<MenuSeparator> for MenuEntry {
    fn from(separator: MenuSeparator) -> Self {
        MenuEntry::Separator(separator)
    }
}

impl Widget for MenuEntry {
    fn base(&self) -> &WidgetBase {
        self.widget().base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.widget_mut().base_mut()
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        self.widget_mut().paint(surface);
    }

    fn handle_events(&mut self, events: &[Event]) {
        self.widget_mut().handle_events(events);
    }
}
