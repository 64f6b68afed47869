// SPDX-License-Identifier: MPL-2.0
//! Virtual-clock timer queue.

use super::{Scheduler, Timer, TimerHandle};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// A timer taken off the queue because its deadline was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    /// Handle returned when the timer was armed.
    pub handle: TimerHandle,
    /// What the timer was armed for.
    pub timer: Timer,
    /// Deadline on the queue's clock.
    pub deadline: Duration,
}

/// Timer queue driven by an externally advanced clock.
///
/// Time is the offset since the queue was created. Timers fire in deadline
/// order; timers sharing a deadline fire in the order they were armed.
///
/// # Example
///
/// ```
/// use iced_blocker::scheduler::{Scheduler, Timer, TimerQueue};
/// use std::time::Duration;
///
/// let mut queue = TimerQueue::new();
/// let late = queue.schedule(Duration::from_millis(20), Timer::MinimumDisplay);
/// let early = queue.schedule(Duration::from_millis(10), Timer::ShowThreshold);
///
/// let first = queue.pop_due_until(Duration::from_millis(50)).unwrap();
/// assert_eq!(first.handle, early);
/// assert_eq!(queue.now(), Duration::from_millis(10));
///
/// let second = queue.pop_due_until(Duration::from_millis(50)).unwrap();
/// assert_eq!(second.handle, late);
/// ```
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, u64), Timer>,
    deadlines: HashMap<TimerHandle, Duration>,
}

impl TimerQueue {
    /// Creates an empty queue with its clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time on the queue's clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Moves the clock forward. The clock never goes backwards.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Deadline of the earliest armed timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes the earliest timer if its deadline is at or before `limit`,
    /// moving the clock to that deadline.
    pub fn pop_due_until(&mut self, limit: Duration) -> Option<FiredTimer> {
        let (&(deadline, id), _) = self.pending.iter().next()?;
        if deadline > limit {
            return None;
        }
        let timer = self.pending.remove(&(deadline, id))?;
        let handle = TimerHandle::from_raw(id);
        self.deadlines.remove(&handle);
        self.set_now(deadline);
        Some(FiredTimer {
            handle,
            timer,
            deadline,
        })
    }

    /// Removes the earliest timer whose deadline has been reached.
    pub fn pop_due(&mut self) -> Option<FiredTimer> {
        self.pop_due_until(self.now)
    }

    /// Returns whether the timer is still waiting to fire.
    #[must_use]
    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle)
    }

    /// Number of armed timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if no timer is armed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let deadline = self.now.saturating_add(delay);
        let handle = TimerHandle::from_raw(id);
        self.pending.insert((deadline, id), timer);
        self.deadlines.insert(handle, deadline);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(deadline) = self.deadlines.remove(&handle) {
            self.pending.remove(&(deadline, handle.raw()));
        }
    }
}
