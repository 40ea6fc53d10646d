use std::time::Duration;

use tokio::time::Instant;

/// Holds back the most recent item until `window` has passed without a
/// newer one arriving. Time is supplied by the caller.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replaces any pending item. Returns `true` if one was coalesced away.
    pub fn push(&mut self, now: Instant, item: T) -> bool {
        self.pending.replace((now, item)).is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at + self.window)
    }

    /// Takes the pending item once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, item)| item)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
