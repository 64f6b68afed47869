// SPDX-License-Identifier: MPL-2.0
//! One-shot timer scheduling.
//!
//! The presenter and the frame sequencer never sleep or spawn on their own.
//! They arm one-shot timers through a [`Scheduler`] and are told when a timer
//! fired. Periodic behaviour is built by re-arming from the fired callback.
//!
//! - [`Scheduler`]: the collaborator contract (`schedule` / `cancel`)
//! - [`TimerQueue`]: virtual-clock implementation, ordered by deadline and
//!   then by arm order; driven by [`crate::sim`] and [`crate::runtime`]

mod queue;

use std::time::Duration;

pub use queue::{FiredTimer, TimerQueue};

/// Handle identifying one armed timer.
///
/// Handles are never reused by a scheduler, so a handle kept after its timer
/// fired or was cancelled can never match a newer timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wraps a raw scheduler-assigned id.
    #[must_use]
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What an armed timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Display threshold elapsed: the overlay may be mounted.
    ShowThreshold,
    /// Minimum display time elapsed: the overlay may be unmounted.
    MinimumDisplay,
    /// Next frame of the indicator animation is due.
    FrameTick,
}

/// One-shot timer service.
pub trait Scheduler {
    /// Arms a one-shot timer firing `delay` from now.
    fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerHandle;

    /// Disarms a timer. Cancelling an unknown or already fired handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}
