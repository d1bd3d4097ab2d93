//! A titled menu in the menu bar that drops its entries down when clicked.

use crate::event::Event;
use crate::geometry::Rect;
use crate::menu::entry::{Action, MenuEntry, MenuSeparator};
use crate::render::Surface;
use crate::widget::{Widget, WidgetBase};
use crate::widgets::{Button, ButtonSignal};

const DEFAULT_WIDTH: i32 = 100;
const DEFAULT_HEIGHT: i32 = 20;

/// Whether a menu's entries are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> MenuState {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }
}

/// A menu title plus its entries.
///
/// Clicking the title toggles the menu; a press anywhere outside the title
/// closes it. Entries are visible exactly while the menu is open.
pub struct Menu {
    button: Button,
    state: MenuState,
    entries: Vec<MenuEntry>,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            button: Button::with_styles(title, Button::styles_with_radius(0)),
            state: MenuState::Closed,
            entries: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        self.button.text()
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    pub fn open(&mut self) {
        self.set_state(MenuState::Open);
    }

    pub fn close(&mut self) {
        self.set_state(MenuState::Closed);
    }

    fn set_state(&mut self, state: MenuState) {
        if state != self.state {
            tracing::trace!(target: "trellis::app", menu = self.button.text(), ?state, "menu state");
        }
        self.state = state;
        let open = state == MenuState::Open;
        for entry in &mut self.entries {
            entry.set_visible(open);
            if !open {
                // Hidden entries never see the release that would clear this.
                entry.reset_interaction();
            }
        }
    }

    /// Append an entry; it takes the menu's current visibility.
    pub fn add_entry(&mut self, entry: impl Into<MenuEntry>) {
        let mut entry = entry.into();
        entry.set_visible(self.is_open());
        self.entries.push(entry);
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.add_entry(action);
        self
    }

    pub fn with_separator(mut self) -> Self {
        self.add_entry(MenuSeparator::new());
        self
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut MenuEntry> {
        self.entries.get_mut(index)
    }

    /// Place the title at `(x, y)`; returns where the next menu goes.
    pub fn prepare(&mut self, x: i32, y: i32) -> (i32, i32) {
        let base = self.button.styles().base();
        let rect = Rect::new(x, y, base.width.unwrap_or(DEFAULT_WIDTH), base.height.unwrap_or(DEFAULT_HEIGHT));
        self.button.set_rect(rect);
        (x + rect.width, y)
    }
}

impl Widget for Menu {
    fn base(&self) -> &WidgetBase {
        self.button.base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.button.base_mut()
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        let Some(rect) = self.button.rect() else { return };
        self.button.paint(surface);
        let mut y = rect.bottom();
        for entry in &mut self.entries {
            (_, y) = entry.prepare(rect.x, y);
            if entry.is_visible() {
                entry.paint(surface);
            }
        }
    }

    fn handle_events(&mut self, events: &[Event]) {
        for entry in &mut self.entries {
            if entry.is_visible() {
                entry.handle_events(events);
            }
        }
        for event in events {
            match self.button.process_event(event) {
                Some(ButtonSignal::Clicked) => self.set_state(self.state.toggled()),
                Some(ButtonSignal::LostFocus) => self.set_state(MenuState::Closed),
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::testing::RecordingSurface;

    fn file_menu() -> Menu {
        let mut menu = Menu::new("File").with_action(Action::new("New")).with_separator().with_action(Action::new("Quit"));
        menu.prepare(0, 0);
        menu
    }

    fn down(x: i32, y: i32) -> Event {
        Event::PointerDown(Point::new(x, y))
    }

    #[test]
    fn entries_start_hidden() {
        let menu = file_menu();
        assert_eq!(menu.state(), MenuState::Closed);
        assert!(menu.entries().iter().all(|e| !e.is_visible()));
    }

    #[test]
    fn click_toggles_and_outside_closes() {
        let mut menu = file_menu();
        menu.handle_events(&[down(10, 10), Event::PointerUp(Point::new(10, 10))]);
        assert!(menu.is_open());
        assert!(menu.entries().iter().all(|e| e.is_visible()));

        menu.handle_events(&[down(10, 10)]);
        assert!(!menu.is_open());

        menu.open();
        menu.handle_events(&[down(400, 300)]);
        assert_eq!(menu.state(), MenuState::Closed);
        assert!(menu.entries().iter().all(|e| !e.is_visible()));
    }

    #[test]
    fn closing_resets_entry_press_across_frames() {
        let mut menu = file_menu();
        menu.open();
        let mut surface = RecordingSurface::new(200, 100);
        menu.paint(&mut surface);

        let on_new = Point::new(10, 25);
        menu.handle_events(&[Event::PointerMove(on_new), down(10, 25)]);
        assert!(!menu.is_open());
        menu.handle_events(&[Event::PointerUp(on_new)]);
        menu.handle_events(&[Event::PointerMove(Point::new(150, 90))]);

        menu.open();
        let new = menu.entries()[0].as_action().unwrap().button();
        assert!(!new.is_pressed());
        assert!(!new.is_hovered());
    }

    #[test]
    fn prepare_uses_widget_style_size() {
        let mut menu = Menu::new("Edit");
        menu.set_style_sheet("widget { width: 60 }").unwrap();
        assert_eq!(menu.prepare(100, 0), (160, 0));
        assert_eq!(menu.rect(), Some(Rect::new(100, 0, 60, 20)));
    }

    #[test]
    fn open_menu_paints_entries_below_title() {
        let mut menu = file_menu();
        menu.open();
        let mut surface = RecordingSurface::new(200, 100);
        menu.paint(&mut surface);
        insta::assert_snapshot!(surface.log(), @r"
        fill (0,0 100x20) #878787 r0
        text (48,10) #ffffff 'File'
        fill (0,20 100x20) #878787 r0
        text (49,30) #ffffff 'New'
        fill (0,40 100x1) #646464 r0
        fill (0,41 100x20) #878787 r0
        text (48,51) #ffffff 'Quit'
        ");
    }
}
