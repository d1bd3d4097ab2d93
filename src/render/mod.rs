//! Rendering: the surface capability and the crossterm terminal backend.

pub mod surface;
pub mod driver;

pub use surface::Surface;
pub use driver::{CellBuffer, TerminalEvents, TerminalSurface};
