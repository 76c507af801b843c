//! Bookkeeping for card reveals waiting on a timer.
//!
//! A page schedules one timer per card whose entrance latch fired with a
//! non-zero delay. The timer's handle is kept here until the timer fires or
//! the page is torn down, whichever happens first. A handle leaves the
//! schedule exactly once: a fired timer is never cancelled afterwards and a
//! cancelled one is never reported as fired.

use std::collections::HashMap;

use tracing::debug;

/// Pending reveal timers of one mounted page, keyed by card index.
#[derive(Debug)]
pub struct RevealSchedule<H> {
    pending: HashMap<usize, H>,
}

impl<H> Default for RevealSchedule<H> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<H> RevealSchedule<H> {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the timer revealing card `index`.
    ///
    /// # Returns
    ///
    /// The handle previously stored for `index`, which the caller still owns
    /// and must cancel.
    pub fn schedule(&mut self, index: usize, handle: H) -> Option<H> {
        self.pending.insert(index, handle)
    }

    /// Marks the timer of card `index` as fired and forgets its handle.
    ///
    /// # Returns
    ///
    /// `true` if the timer was still pending.
    pub fn fire(&mut self, index: usize) -> bool {
        self.pending.remove(&index).is_some()
    }

    /// Cancels every timer that has not fired yet.
    ///
    /// # Returns
    ///
    /// The number of timers cancelled.
    pub fn cancel_all(&mut self, mut cancel: impl FnMut(H)) -> usize {
        let count = self.pending.len();
        for (_, handle) in self.pending.drain() {
            cancel(handle);
        }
        if count > 0 {
            debug!(count, "Cancelled pending reveals");
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::state::reveal::RevealSchedule;

    /// Stand-in for a main-loop source that must be removed at most once.
    #[derive(Debug, PartialEq, Eq)]
    struct Source(usize);

    fn cancel_into(removed: &mut HashSet<usize>) -> impl FnMut(Source) + '_ {
        move |source| assert!(removed.insert(source.0), "source {} removed twice", source.0)
    }

    #[test]
    fn test_teardown_cancels_every_pending_reveal() {
        let mut schedule = RevealSchedule::new();
        for index in 1..6 {
            assert_eq!(schedule.schedule(index, Source(index)), None);
        }

        let mut removed = HashSet::new();
        assert_eq!(schedule.cancel_all(cancel_into(&mut removed)), 5);
        assert_eq!(removed, (1..6).collect::<HashSet<_>>());
        assert!(schedule.pending.is_empty());
    }

    #[test]
    fn test_fired_reveal_is_removed_once() {
        let mut schedule = RevealSchedule::new();
        schedule.schedule(1, Source(1));
        schedule.schedule(2, Source(2));

        assert!(schedule.fire(1));
        assert!(!schedule.fire(1));

        let mut removed = HashSet::new();
        assert_eq!(schedule.cancel_all(cancel_into(&mut removed)), 1);
        assert_eq!(removed, HashSet::from([2]));

        // A second teardown finds nothing left to remove.
        assert_eq!(schedule.cancel_all(cancel_into(&mut removed)), 0);
        assert!(!schedule.fire(2));
    }

    #[test]
    fn test_rescheduling_returns_previous_handle() {
        let mut schedule = RevealSchedule::new();
        schedule.schedule(3, Source(3));
        assert_eq!(schedule.schedule(3, Source(30)), Some(Source(3)));
        assert!(schedule.fire(3));
    }
}
