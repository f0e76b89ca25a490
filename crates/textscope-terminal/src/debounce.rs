//! Single-slot trailing debounce.
//!
//! A [`Debouncer`] holds at most one pending value. Every
//! [`trigger`](Debouncer::trigger) replaces the pending value and restarts
//! the quiet period (latest wins); [`poll`](Debouncer::poll) hands the value
//! out once the quiet period has elapsed with no further triggers.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use textscope_terminal::Debouncer;
//!
//! let start = Instant::now();
//! let mut debouncer = Debouncer::new(Duration::from_millis(150));
//! debouncer.trigger("first", start);
//! debouncer.trigger("second", start + Duration::from_millis(10));
//!
//! assert_eq!(debouncer.poll(start + Duration::from_millis(100)), None);
//! assert_eq!(debouncer.poll(start + Duration::from_millis(160)), Some("second"));
//! assert_eq!(debouncer.poll(start + Duration::from_millis(500)), None);
//! ```
//!
//! Time is passed in explicitly; the debouncer never reads a clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due: Instant,
}

/// Collapses bursts of triggers into one delivery after a quiet period.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// The quiet period.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Change the quiet period. A pending value keeps its current due time.
    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    /// Schedule `value`, superseding any unfired one.
    pub fn trigger(&mut self, value: T, now: Instant) {
        let superseded = self.pending.is_some();
        self.pending = Some(Pending {
            value,
            due: now + self.window,
        });
        if superseded {
            tracing::trace!("debounce restarted");
        }
    }

    /// Take the pending value if its quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.due <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drop the pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Whether a value is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due.
    #[must_use]
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Time left until the pending value is due, zero if overdue.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due_at().map(|due| due.saturating_duration_since(now))
    }
}
