//! Cooperative interval timers polled once per frame.
//!
//! A running timer fires when at least `interval` has elapsed since it was
//! started or last fired. Firing happens inside [`TimerRegistry::poll_at`],
//! so a slow callback delays the frame; there is no preemption.

use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a timer owned by a [`TimerRegistry`].
    pub struct TimerId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running { last: Instant },
}

pub struct Timer {
    callback: Box<dyn FnMut()>,
    interval: Duration,
    state: TimerState,
}

impl Timer {
    /// A stopped timer.
    pub fn new(callback: impl FnMut() + 'static, interval: Duration) -> Self {
        Self { callback: Box::new(callback), interval, state: TimerState::Stopped }
    }

    /// Negative or NaN intervals become zero, overflowing ones saturate.
    pub fn from_secs(callback: impl FnMut() + 'static, interval_secs: f64) -> Self {
        let interval = Duration::try_from_secs_f64(interval_secs.max(0.0)).unwrap_or(Duration::MAX);
        Self::new(callback, interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Start (or restart) counting from `now`.
    pub fn start_at(&mut self, now: Instant) {
        self.state = TimerState::Running { last: now };
    }

    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Fire if running and due; returns whether the callback ran.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        let TimerState::Running { last } = self.state else {
            return false;
        };
        if now.saturating_duration_since(last) < self.interval {
            return false;
        }
        (self.callback)();
        self.state = TimerState::Running { last: now };
        true
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer").field("interval", &self.interval).field("state", &self.state).finish()
    }
}

/// Owns timers and hands out stable [`TimerId`]s.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    timers: SlotMap<TimerId, Timer>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, timer: Timer) -> TimerId {
        self.timers.insert(timer)
    }

    pub fn get(&self, id: TimerId) -> Option<&Timer> {
        self.timers.get(id)
    }

    pub fn get_mut(&mut self, id: TimerId) -> Option<&mut Timer> {
        self.timers.get_mut(id)
    }

    pub fn remove(&mut self, id: TimerId) -> Option<Timer> {
        self.timers.remove(id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Poll every timer; returns how many fired.
    pub fn poll_at(&mut self, now: Instant) -> usize {
        let fired = self.timers.values_mut().map(|t| t.poll_at(now)).filter(|&fired| fired).count();
        if fired > 0 {
            tracing::trace!(target: "trellis::app", fired, "timers fired");
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting(interval: Duration) -> (Timer, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (Timer::new(move || c.set(c.get() + 1), interval), count)
    }

    #[test]
    fn stopped_timer_never_fires() {
        let (mut timer, count) = counting(Duration::ZERO);
        assert!(!timer.poll_at(Instant::now()));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn fires_once_per_elapsed_interval() {
        let (mut timer, count) = counting(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.start_at(t0);
        assert!(!timer.poll_at(t0 + Duration::from_millis(99)));
        assert!(timer.poll_at(t0 + Duration::from_millis(100)));
        // Counting restarts from the firing time.
        assert!(!timer.poll_at(t0 + Duration::from_millis(150)));
        assert!(timer.poll_at(t0 + Duration::from_millis(250)));
        assert_eq!(count.get(), 2);

        timer.stop();
        assert!(!timer.poll_at(t0 + Duration::from_secs(10)));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn from_secs_clamps() {
        let noop = || {};
        assert_eq!(Timer::from_secs(noop, -1.0).interval(), Duration::ZERO);
        assert_eq!(Timer::from_secs(noop, f64::NAN).interval(), Duration::ZERO);
        assert_eq!(Timer::from_secs(noop, 0.5).interval(), Duration::from_millis(500));
    }

    #[test]
    fn registry_polls_all_and_removes() {
        let mut registry = TimerRegistry::new();
        let (mut a, count_a) = counting(Duration::ZERO);
        let (b, count_b) = counting(Duration::ZERO);
        let now = Instant::now();
        a.start_at(now);
        let id_a = registry.insert(a);
        let id_b = registry.insert(b);

        assert_eq!(registry.poll_at(now), 1);
        registry.get_mut(id_b).unwrap().start_at(now);
        assert_eq!(registry.poll_at(now), 2);
        assert_eq!((count_a.get(), count_b.get()), (2, 1));

        assert!(registry.remove(id_a).is_some());
        assert!(registry.get(id_a).is_none());
        assert_eq!(registry.len(), 1);
    }
}
