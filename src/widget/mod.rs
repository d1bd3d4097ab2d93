//! Widget system: trait, shared base state, paint helpers, the `Element` sum type.

pub mod traits;
pub mod paint;
pub mod element;

pub use element::Element;
pub use traits::{Widget, WidgetBase};
