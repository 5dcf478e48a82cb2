//! Timer queue - fire-and-forget delayed transitions.
//!
//! Staggered reveals schedule one entry per group member. Entries are not
//! cancellable; when an entry fires for an element that has left the page
//! the consumer drops it (existence check, never a panic). Draining is
//! ordered by due time, then schedule order, so a group revealed with a
//! common trigger instant fires in document order.

use std::time::Duration;

#[derive(Debug)]
struct Entry<T> {
    due: Duration,
    seq: u64,
    payload: T,
}

/// Monotonic-clock delay queue. Time is supplied by the caller on every
/// drain, so tests run on a virtual clock.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self { entries: Vec::new(), seq: 0 }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire at `due`.
    pub fn schedule(&mut self, due: Duration, payload: T) {
        let seq = self.seq;
        self.seq += 1;
        self.entries.push(Entry { due, seq, payload });
    }

    /// Remove and return every entry due at or before `now`, in
    /// (due, schedule) order.
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        let mut due: Vec<Entry<T>> = Vec::new();
        let mut rest: Vec<Entry<T>> = Vec::new();
        for entry in self.entries.drain(..) {
            if entry.due <= now {
                due.push(entry);
            } else {
                rest.push(entry);
            }
        }
        self.entries = rest;

        due.sort_by_key(|e| (e.due, e.seq));
        due.into_iter().map(|e| e.payload).collect()
    }

    /// Earliest pending deadline, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.due).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
