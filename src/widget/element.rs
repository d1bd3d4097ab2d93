//! The closed set of widgets a layout or window can own.

use crate::event::Event;
use crate::geometry::Rect;
use crate::layout::{BoxLayout, FormLayout};
use crate::render::Surface;
use crate::widget::{Widget, WidgetBase};
use crate::widgets::{Button, ImageBox, Label, List, ProgressBar, Slider, TextBox};

/// A widget placed in a layout or at the top level of a window.
pub enum Element {
    Layout(BoxLayout),
    Form(FormLayout),
    Button(Button),
    Label(Label),
    TextBox(TextBox),
    Slider(Slider),
    List(List),
    ProgressBar(ProgressBar),
    ImageBox(ImageBox),
}

macro_rules! delegate {
    ($self:expr, $w:ident => $body:expr) => {
        match $self {
            Element::Layout($w) => $body,
            Element::Form($w) => $body,
            Element::Button($w) => $body,
            Element::Label($w) => $body,
            Element::TextBox($w) => $body,
            Element::Slider($w) => $body,
            Element::List($w) => $body,
            Element::ProgressBar($w) => $body,
            Element::ImageBox($w) => $body,
        }
    };
}

macro_rules! element_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Element {
                fn from(widget: $ty) -> Self {
                    Element::$variant(widget)
                }
            }
        )*
    };
}

element_from!(
    Layout(BoxLayout),
    Form(FormLayout),
    Button(Button),
    Label(Label),
    TextBox(TextBox),
    Slider(Slider),
    List(List),
    ProgressBar(ProgressBar),
    ImageBox(ImageBox),
);

impl Element {
    /// Short kind name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Layout(_) => "layout",
            Element::Form(_) => "form",
            Element::Button(_) => "button",
            Element::Label(_) => "label",
            Element::TextBox(_) => "textbox",
            Element::Slider(_) => "slider",
            Element::List(_) => "list",
            Element::ProgressBar(_) => "progressbar",
            Element::ImageBox(_) => "imagebox",
        }
    }

    pub fn as_button(&self) -> Option<&Button> {
        match self {
            Element::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Element::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Element::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Element::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_slider(&self) -> Option<&Slider> {
        match self {
            Element::Slider(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_layout_mut(&mut self) -> Option<&mut BoxLayout> {
        match self {
            Element::Layout(l) => Some(l),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("kind", &self.kind())
            .field("rect", &self.rect())
            .field("visible", &self.is_visible())
            .finish()
    }
}

impl Widget for Element {
    fn base(&self) -> &WidgetBase {
        delegate!(self, w => w.base())
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        delegate!(self, w => w.base_mut())
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        delegate!(self, w => w.paint(surface))
    }

    fn handle_events(&mut self, events: &[Event]) {
        delegate!(self, w => w.handle_events(events))
    }

    fn geometry_changed(&mut self) {
        delegate!(self, w => w.geometry_changed())
    }

    fn set_rect(&mut self, rect: Rect) {
        delegate!(self, w => w.set_rect(rect))
    }

    fn attach(&mut self, parent_rect: Option<Rect>) {
        delegate!(self, w => w.attach(parent_rect))
    }
}
