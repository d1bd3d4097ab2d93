//! Event system: input events and the sources that produce them.

pub mod input;

pub use input::{Event, Key, KeyEvent, Modifiers};

/// Produces one batch of events per frame.
///
/// An empty batch is a normal frame with no input; implementations must not
/// block waiting for events.
pub trait EventSource {
    fn poll_events(&mut self) -> std::io::Result<Vec<Event>>;
}
