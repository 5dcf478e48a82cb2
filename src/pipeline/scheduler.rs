//! Frame scheduler - coalesces event bursts into one update per cycle.
//!
//! The guard is a pending payload, not a queue: the first request in a cycle
//! schedules the frame, later requests before it fires replace the payload
//! (latest wins) without scheduling another cycle. Staleness is bounded at
//! one frame and there is never a backlog.
//!
//! [`Debouncer`] is the low-priority variant for cheap scroll bookkeeping
//! that does not need per-frame precision: a short fixed delay, cancelled
//! and restarted on every call.

use std::time::Duration;

/// Default settling delay for [`Debouncer`].
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(10);

// =============================================================================
// FRAME SCHEDULER
// =============================================================================

/// One-pending-update-per-cycle coalescer.
///
/// `T` is whatever the caller wants delivered to the frame: an input-event
/// tag, a closure, a snapshot request. Only the latest value survives.
#[derive(Debug, Default)]
pub struct FrameScheduler<T> {
    pending: Option<T>,
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Request an update for the next frame.
    ///
    /// Returns `true` if this request scheduled a new cycle, `false` if one
    /// was already pending (the request was coalesced; the payload still
    /// replaces the stored one).
    pub fn request(&mut self, payload: T) -> bool {
        let newly_scheduled = self.pending.is_none();
        self.pending = Some(payload);
        newly_scheduled
    }

    /// Take the pending payload at the start of a frame, clearing the guard
    /// so the next request schedules a fresh cycle.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// =============================================================================
// DEBOUNCER
// =============================================================================

/// Cancel-and-restart debouncer over a caller-supplied monotonic clock.
///
/// Time is passed in explicitly (milliseconds since mount work fine); the
/// engine is single-threaded and never sleeps on its own.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Restart the settling window. Any earlier pending deadline is
    /// cancelled.
    pub fn kick(&mut self, now: Duration) {
        self.deadline = Some(now + self.delay);
    }

    /// Fire if the window has settled. Clears the deadline on fire so each
    /// kick produces at most one fire.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_coalesces_to_latest() {
        let mut sched: FrameScheduler<u32> = FrameScheduler::new();

        assert!(sched.request(1));
        assert!(!sched.request(2));
        assert!(!sched.request(3));

        // Exactly one payload per cycle, and it is the latest.
        assert_eq!(sched.take(), Some(3));
        assert_eq!(sched.take(), None);
    }

    #[test]
    fn test_guard_clears_after_frame() {
        let mut sched: FrameScheduler<&str> = FrameScheduler::new();

        sched.request("a");
        assert!(sched.is_pending());
        sched.take();
        assert!(!sched.is_pending());

        // A fresh request schedules a new cycle.
        assert!(sched.request("b"));
    }

    #[test]
    fn test_debouncer_cancel_and_restart() {
        let mut d = Debouncer::new(10 * MS);

        d.kick(0 * MS);
        // Not settled yet.
        assert!(!d.fire(5 * MS));
        // Restarted: the old deadline at 10ms no longer fires.
        d.kick(8 * MS);
        assert!(!d.fire(12 * MS));
        assert!(d.fire(18 * MS));
        // One fire per kick.
        assert!(!d.fire(30 * MS));
    }

    #[test]
    fn test_debouncer_unarmed_never_fires() {
        let mut d = Debouncer::default();
        assert!(!d.is_armed());
        assert!(!d.fire(Duration::from_secs(1)));
    }
}
