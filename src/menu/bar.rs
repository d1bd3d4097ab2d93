//! The strip across the top of the window holding the menus.

use crate::css::color::Color;
use crate::css::stylesheet::StyleSet;
use crate::css::styles::StyleRecord;
use crate::event::Event;
use crate::geometry::Rect;
use crate::menu::dropdown::Menu;
use crate::render::Surface;
use crate::widget::paint::draw_box;
use crate::widget::{Widget, WidgetBase};

const DEFAULT_HEIGHT: i32 = 20;

pub struct MenuBar {
    base: WidgetBase,
    menus: Vec<Menu>,
}

impl MenuBar {
    pub const SELECTOR: &'static str = "menu_bar";

    pub fn default_styles() -> StyleSet {
        StyleSet::new().with(Self::SELECTOR, StyleRecord::new().with_bg(Color::rgb(0x87, 0x87, 0x87)))
    }

    pub fn new() -> Self {
        Self { base: WidgetBase::new(Self::default_styles()), menus: Vec::new() }
    }

    /// The `menu_bar` style height, or 20.
    pub fn height(&self) -> i32 {
        self.base.styles().resolve(Self::SELECTOR).height.unwrap_or(DEFAULT_HEIGHT)
    }

    /// Append a menu and return it for further setup.
    pub fn add_menu(&mut self, menu: Menu) -> &mut Menu {
        self.menus.push(menu);
        let last = self.menus.len() - 1;
        &mut self.menus[last]
    }

    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.menus.push(menu);
        self
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn menu_mut(&mut self, index: usize) -> Option<&mut Menu> {
        self.menus.get_mut(index)
    }

    /// Lay the visible menus out left to right from the bar's origin.
    fn arrange(&mut self) {
        let Some(rect) = self.base.rect() else { return };
        let (mut x, y) = (rect.x, rect.y);
        for menu in self.menus.iter_mut().filter(|m| m.is_visible()) {
            (x, _) = menu.prepare(x, y);
        }
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for MenuBar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        let width = surface.size().width;
        let rect = Rect::new(0, 0, width, self.height());
        self.base.set_rect(rect);
        draw_box(surface, rect, self.base.styles().resolve(Self::SELECTOR));
        self.arrange();
        for menu in self.menus.iter_mut().filter(|m| m.is_visible()) {
            menu.paint(surface);
        }
    }

    fn handle_events(&mut self, events: &[Event]) {
        for menu in self.menus.iter_mut().filter(|m| m.is_visible()) {
            menu.handle_events(events);
        }
    }
}
