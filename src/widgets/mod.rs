//! Built-in widgets: Label, TextBox, Button, Slider, List, ProgressBar, ImageBox.

pub mod label;
pub mod text_box;
pub mod button;
pub mod slider;
pub mod list;
pub mod progress;
pub mod image_box;

pub use button::{Button, ButtonSignal};
pub use image_box::ImageBox;
pub use label::Label;
pub use list::List;
pub use progress::ProgressBar;
pub use slider::Slider;
pub use text_box::TextBox;
