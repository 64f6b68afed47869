// SPDX-License-Identifier: MPL-2.0
//! Timing newtypes.
//!
//! Display delays accept any millisecond count and are honoured exactly.
//! The frame interval clamps to [`frame_interval_bounds`] on construction.

use std::time::Duration;

// =============================================================================
// Display Defaults
// =============================================================================

/// Defaults for the display threshold and the minimum display time.
pub mod display_defaults {
    /// Default display threshold in milliseconds.
    pub const DEFAULT_THRESHOLD_MS: u32 = 0;
    /// Default minimum display time in milliseconds.
    pub const DEFAULT_MINIMUM_MS: u32 = 0;
}

// =============================================================================
// DisplayThreshold
// =============================================================================

/// Delay between a show request and the moment the overlay is mounted.
///
/// Work that finishes before the threshold elapses never produces a
/// long-lived blocker.
///
/// # Example
///
/// ```
/// use iced_blocker::domain::timing::DisplayThreshold;
///
/// let threshold = DisplayThreshold::new(500);
/// assert_eq!(threshold.value(), 500);
///
/// // Long delays are kept as given
/// assert_eq!(DisplayThreshold::new(90_000).value(), 90_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayThreshold(u32);

impl DisplayThreshold {
    /// Creates a new display threshold.
    #[must_use]
    pub fn new(millis: u32) -> Self {
        Self(millis)
    }

    /// Returns the threshold in milliseconds.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the threshold as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }

    /// Returns true if the overlay is requested with no delay.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Default for DisplayThreshold {
    fn default() -> Self {
        Self(display_defaults::DEFAULT_THRESHOLD_MS)
    }
}

// =============================================================================
// MinimumDisplayTime
// =============================================================================

/// Floor duration the overlay stays mounted, measured from the mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinimumDisplayTime(u32);

impl MinimumDisplayTime {
    /// Creates a new minimum display time.
    #[must_use]
    pub fn new(millis: u32) -> Self {
        Self(millis)
    }

    /// Returns the minimum display time in milliseconds.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the minimum display time as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }
}

impl Default for MinimumDisplayTime {
    fn default() -> Self {
        Self(display_defaults::DEFAULT_MINIMUM_MS)
    }
}

// =============================================================================
// Frame Interval Bounds
// =============================================================================

/// Frame interval bounds (16 ms to 5 s).
pub mod frame_interval_bounds {
    /// Minimum interval in milliseconds (roughly one 60 Hz frame).
    pub const MIN_MS: u32 = 16;
    /// Maximum interval in milliseconds.
    pub const MAX_MS: u32 = 5_000;
    /// Default interval in milliseconds.
    pub const DEFAULT_MS: u32 = 300;
}

// =============================================================================
// FrameInterval
// =============================================================================

/// Cadence at which the frame sequencer advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameInterval(u32);

impl FrameInterval {
    /// Creates a new frame interval, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u32) -> Self {
        Self(millis.clamp(frame_interval_bounds::MIN_MS, frame_interval_bounds::MAX_MS))
    }

    /// Returns the interval in milliseconds.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the interval as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }
}

impl Default for FrameInterval {
    fn default() -> Self {
        Self(frame_interval_bounds::DEFAULT_MS)
    }
}
