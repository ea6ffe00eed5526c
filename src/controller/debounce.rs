use std::time::{Duration, Instant};

/// Trailing-edge debounce for one input stream.
///
/// At most one task is pending. Scheduling replaces the pending payload and
/// restarts the quiet window; the task becomes due once `delay` has passed
/// since the last `schedule`. The caller supplies the clock.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
        }
    }

    /// Schedule `payload`, cancelling whatever was pending
    pub fn schedule(&mut self, payload: T, now: Instant) {
        self.pending = Some((now + self.delay, payload));
    }

    /// Drop the pending task, returning its payload
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, payload)| payload)
    }

    /// When the pending task becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Take the payload if its quiet window has elapsed by `now`
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|deadline| deadline <= now) {
            self.cancel()
        } else {
            None
        }
    }
}
