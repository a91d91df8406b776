//! Trailing-edge debouncing as an explicit timer-gated buffer.
//!
//! The caller supplies the clock: every [`Debouncer::push`] records the
//! value and restarts the quiet interval, and [`Debouncer::poll`] releases
//! the latest value once the interval has elapsed with no further input.
//! Keeping time external makes the buffer usable from an async loop, a UI
//! tick, or a test with synthetic instants.

use std::time::{Duration, Instant};

/// Quiet interval applied to search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Collapses bursts of values, keeping only the last.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet interval.
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// The configured quiet interval.
    #[must_use]
    pub const fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Buffer `value`, replacing any pending one, and restart the interval.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.quiet,
        });
    }

    /// When the pending value becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Whether a value is waiting for its quiet interval.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its quiet interval has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.flush(),
            _ => None,
        }
    }

    /// Take the pending value regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
