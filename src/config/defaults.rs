// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Timing**: Display threshold and minimum display time
//! - **Indicator**: Size, padding and message styling
//! - **Backdrop**: Full-screen blocker appearance and behaviour
//! - **Frames**: Frame sequencer cadence and start position

use crate::domain::timing::{display_defaults, frame_interval_bounds};

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default delay before the overlay is mounted (in milliseconds).
pub const DEFAULT_DISPLAY_THRESHOLD_MS: u32 = display_defaults::DEFAULT_THRESHOLD_MS;

/// Default minimum time the overlay stays mounted (in milliseconds).
pub const DEFAULT_MINIMUM_DISPLAY_TIME_MS: u32 = display_defaults::DEFAULT_MINIMUM_MS;

// ==========================================================================
// Indicator Defaults
// ==========================================================================

/// Default indicator width and height.
pub const DEFAULT_INDICATOR_SIZE: f32 = 60.0;

/// Default padding around the indicator.
pub const DEFAULT_PADDING: f32 = 0.0;

/// Default font size of the message label.
pub const DEFAULT_MESSAGE_FONT_SIZE: f32 = 20.0;

// ==========================================================================
// Backdrop Defaults
// ==========================================================================

/// Default backdrop opacity (0.0 to 1.0).
pub const DEFAULT_BACKGROUND_ALPHA: f32 = 0.5;

/// Whether the backdrop swallows input by default.
pub const DEFAULT_BLOCKING_SCREEN: bool = true;

/// Whether a tap force-closes the overlay by default.
pub const DEFAULT_CLOSEABLE: bool = false;

// ==========================================================================
// Frame Defaults
// ==========================================================================

/// Default time between two indicator frames (in milliseconds).
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = frame_interval_bounds::DEFAULT_MS;

/// Default index of the first sequenced frame (frame 0 is the poster).
pub const DEFAULT_FRAME_START_CURSOR: usize = 1;
