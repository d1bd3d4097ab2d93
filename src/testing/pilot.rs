//! Pilot: drive a headless window manager frame by frame.
//!
//! [`ScriptedEvents`] is an [`EventSource`] fed from a queue of prepared
//! batches. [`Pilot`] pairs it with a [`RecordingSurface`] inside a
//! [`WindowManager`] and offers pointer-level helpers.

use std::collections::VecDeque;
use std::io;

use crate::app::{WindowConfig, WindowManager};
use crate::event::{Event, EventSource};
use crate::geometry::{Point, Size};
use crate::testing::recorder::RecordingSurface;

// ---------------------------------------------------------------------------
// ScriptedEvents
// ---------------------------------------------------------------------------

/// Event source replaying queued batches, one per poll. Empty when drained.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    batches: VecDeque<Vec<Event>>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one frame's batch.
    pub fn push(&mut self, batch: impl IntoIterator<Item = Event>) {
        self.batches.push_back(batch.into_iter().collect());
    }

    pub fn with_batch(mut self, batch: impl IntoIterator<Item = Event>) -> Self {
        self.push(batch);
        self
    }

    /// Batches not yet delivered.
    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl EventSource for ScriptedEvents {
    fn poll_events(&mut self) -> io::Result<Vec<Event>> {
        Ok(self.batches.pop_front().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless window for tests.
///
/// # Examples
///
/// ```ignore
/// use trellis::testing::Pilot;
/// use trellis::widgets::Button;
///
/// let mut pilot = Pilot::new(200, 100);
/// pilot.wm_mut().add_widget(Button::new("ok"));
/// pilot.click(10, 10).unwrap();
/// ```
pub struct Pilot {
    wm: WindowManager<RecordingSurface, ScriptedEvents>,
}

impl Pilot {
    /// A window of the given size with no title.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_config(WindowConfig::default().with_resolution(Size::new(width, height)))
    }

    pub fn with_config(config: WindowConfig) -> Self {
        Self { wm: WindowManager::new(config, RecordingSurface::default(), ScriptedEvents::new()) }
    }

    pub fn wm(&self) -> &WindowManager<RecordingSurface, ScriptedEvents> {
        &self.wm
    }

    pub fn wm_mut(&mut self) -> &mut WindowManager<RecordingSurface, ScriptedEvents> {
        &mut self.wm
    }

    pub fn surface(&self) -> &RecordingSurface {
        self.wm.surface()
    }

    // ── Frames ───────────────────────────────────────────────────────

    /// Run one frame with `events` as its batch.
    pub fn frame(&mut self, events: impl IntoIterator<Item = Event>) -> io::Result<()> {
        self.wm.events_mut().push(events);
        self.wm.process()
    }

    /// Run one frame with no events.
    pub fn idle(&mut self) -> io::Result<()> {
        self.wm.process()
    }

    // ── Input simulation ─────────────────────────────────────────────

    pub fn move_to(&mut self, x: i32, y: i32) -> io::Result<()> {
        self.frame([Event::PointerMove(Point::new(x, y))])
    }

    /// Move, press and release at `(x, y)` in one frame.
    pub fn click(&mut self, x: i32, y: i32) -> io::Result<()> {
        let p = Point::new(x, y);
        self.frame([Event::PointerMove(p), Event::PointerDown(p), Event::PointerUp(p)])
    }

    /// Press at `from`, move to `to`, release there; one frame per step.
    pub fn drag(&mut self, from: Point, to: Point) -> io::Result<()> {
        self.frame([Event::PointerMove(from), Event::PointerDown(from)])?;
        self.frame([Event::PointerMove(to)])?;
        self.frame([Event::PointerUp(to)])
    }

    pub fn resize(&mut self, width: i32, height: i32) -> io::Result<()> {
        self.frame([Event::Resize(Size::new(width, height))])
    }

    pub fn quit(&mut self) -> io::Result<()> {
        self.frame([Event::Quit])
    }

    pub fn is_running(&self) -> bool {
        !self.wm.should_quit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::widget::Widget;
    use crate::widgets::Button;

    #[test]
    fn scripted_events_replay_in_order() {
        let mut events = ScriptedEvents::new().with_batch([Event::Quit]);
        events.push([Event::PointerMove(Point::new(1, 1)), Event::Quit]);
        assert_eq!(events.remaining(), 2);
        assert_eq!(events.poll_events().unwrap(), vec![Event::Quit]);
        assert_eq!(events.poll_events().unwrap().len(), 2);
        assert!(events.poll_events().unwrap().is_empty());
    }

    #[test]
    fn pilot_click_and_quit() {
        let mut pilot = Pilot::new(100, 50);
        pilot.wm_mut().add_widget(Button::new("ok").with_rect(Rect::new(0, 0, 20, 10)));
        pilot.move_to(5, 5).unwrap();
        assert!(pilot.wm().widgets()[0].as_button().is_some_and(Button::is_hovered));
        pilot.click(5, 5).unwrap();
        assert!(pilot.wm().widgets()[0].is_visible());
        assert!(pilot.is_running());
        pilot.quit().unwrap();
        assert!(!pilot.is_running());
        assert_eq!(pilot.surface().frames(), 3);
    }
}
