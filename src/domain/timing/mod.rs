// SPDX-License-Identifier: MPL-2.0
//! Timing domain types.
//!
//! Millisecond delays used by the presenter and the frame sequencer,
//! independent of any scheduler or runtime.

pub mod newtypes;

pub use newtypes::{
    display_defaults, frame_interval_bounds, DisplayThreshold, FrameInterval, MinimumDisplayTime,
};
