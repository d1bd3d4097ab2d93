//! Headless testing: a recording surface, scripted events, and the Pilot.
//!
//! [`RecordingSurface`] logs every draw call as one line of text, ready for
//! inline snapshots. [`Pilot`] drives a [`WindowManager`](crate::app::WindowManager)
//! over it without a terminal.

pub mod pilot;
pub mod recorder;

pub use pilot::{Pilot, ScriptedEvents};
pub use recorder::{DrawOp, RecordingSurface};
