//! Menu bar, drop-down menus and their entries.
//!
//! The bar owns its menus and each menu owns its entries; none of them
//! live in the element tree. Events go to children before their owner.

pub mod bar;
pub mod dropdown;
pub mod entry;

pub use bar::MenuBar;
pub use dropdown::{Menu, MenuState};
pub use entry::{Action, MenuEntry, MenuSeparator};
