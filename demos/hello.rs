//! A small terminal window: menu bar, a list, a slider, a progress bar and a
//! form, all sized in terminal cells through stylesheets.
//!
//! Run with `cargo run --example hello`. Ctrl-C or File > Quit exits.

use std::cell::Cell;
use std::io;
use std::rc::Rc;

use trellis::layout::{BoxLayout, FormLayout};
use trellis::menu::{Action, Menu};
use trellis::render::{TerminalEvents, TerminalSurface};
use trellis::widget::Widget;
use trellis::widgets::{Button, Label, List, ProgressBar, Slider, TextBox};
use trellis::{WindowConfig, WindowManager};

const CELL_MENU: &str = "widget { width: 8; height: 1 }";
const CELL_ENTRY: &str = "widget { width: 12; height: 1 }";

fn entry(caption: &str) -> io::Result<Action> {
    let mut action = Action::new(caption);
    action.set_style_sheet(CELL_ENTRY).map_err(io::Error::other)?;
    Ok(action)
}

fn main() -> io::Result<()> {
    let mut surface = TerminalSurface::new()?;
    surface.enter()?;
    let mut wm = WindowManager::new(WindowConfig::new("Hello trellis").fullscreen(), surface, TerminalEvents::new());
    let quit = wm.quit_handle();

    let bar = wm.build_menu_bar();
    bar.set_style_sheet("menu_bar { height: 1 }").map_err(io::Error::other)?;
    let mut file = Menu::new("File")
        .with_action(entry("New")?)
        .with_separator()
        .with_action(entry("Quit")?.on_triggered(move || quit.request()));
    file.set_style_sheet(CELL_MENU).map_err(io::Error::other)?;
    let mut edit = Menu::new("Edit").with_action(entry("Copy")?);
    edit.set_style_sheet(CELL_MENU).map_err(io::Error::other)?;
    bar.add_menu(file);
    bar.add_menu(edit);
    wm.update_layout_rect();

    let progress = Rc::new(Cell::new(0.5_f32));
    let slider_value = progress.clone();
    let mut slider = Slider::horizontal()
        .with_value(0.5)
        .on_value_changed(move |v| slider_value.set(v));
    slider.set_style_sheet("slider.selector.normal, slider.selector.hover, slider.selector.pressed { width: 3 }")
        .map_err(io::Error::other)?;

    let mut form = FormLayout::new().with_title_width(12);
    form.add_row("Button", Button::new("Press me"));
    form.add_row("Label", Label::new("Just text"));
    form.add_row("TextBox", TextBox::new("Read only"));

    let mut right = BoxLayout::vertical();
    right.add_with_proportion(ProgressBar::new().with_value(0.5), 0.1);
    right.add_with_proportion(slider, 0.1);
    right.add_with_proportion(form, 0.8);

    let mut list = List::new((0..100).map(|i| format!("item {i}")));
    list.set_style_sheet("list.item.normal, list.item.hover, list.item.selected { height: 1 }")
        .map_err(io::Error::other)?;

    let mut root = BoxLayout::horizontal();
    root.add_with_proportion(list, 0.25);
    root.add_with_proportion(right, 0.75);
    wm.add_widget(root);

    let result = run(&mut wm, &progress);
    wm.surface_mut().leave()?;
    result
}

/// The frame loop, mirroring the slider value into the progress bar.
fn run(wm: &mut WindowManager<TerminalSurface, TerminalEvents>, progress: &Cell<f32>) -> io::Result<()> {
    while !wm.should_quit() {
        wm.process()?;
        let bar = wm
            .widget_mut(0)
            .and_then(|root| root.as_layout_mut())
            .and_then(|root| root.child_mut(1))
            .and_then(|right| right.as_layout_mut())
            .and_then(|right| right.child_mut(0));
        if let Some(trellis::Element::ProgressBar(bar)) = bar {
            bar.set_value(progress.get());
        }
    }
    Ok(())
}
