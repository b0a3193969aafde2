//! Cancellable quiescence timer for the search box.
//!
//! One pending deadline per subject: every keystroke restarts the window, so
//! only input that has been stable for the full window is ever committed.
//! Intermediate keystrokes never produce a visible result update.

use std::time::{Duration, Instant};

/// Default quiescence window for search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Note fresh input: restarts the window, cancelling any pending fire.
    pub fn note_input(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Drop the pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire once when the window has elapsed. Subsequent calls return false
    /// until new input arrives.
    pub fn fire_if_ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn does_not_fire_before_the_window_elapses() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.note_input(start);
        assert!(!debouncer.fire_if_ready(start + Duration::from_millis(299)));
        assert!(debouncer.is_pending());
    }

    #[test]
    fn fires_once_after_quiescence() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.note_input(start);
        assert!(debouncer.fire_if_ready(start + Duration::from_millis(300)));
        assert!(!debouncer.fire_if_ready(start + Duration::from_millis(400)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn each_keystroke_restarts_the_window() {
        // Rapid keystrokes inside the window: only the final one commits.
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.note_input(start);
        debouncer.note_input(start + Duration::from_millis(100));
        debouncer.note_input(start + Duration::from_millis(200));

        assert!(!debouncer.fire_if_ready(start + Duration::from_millis(350)));
        assert!(debouncer.fire_if_ready(start + Duration::from_millis(500)));
    }

    #[test]
    fn cancel_drops_the_pending_fire() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.note_input(start);
        debouncer.cancel();
        assert!(!debouncer.fire_if_ready(start + Duration::from_millis(600)));
    }
}
