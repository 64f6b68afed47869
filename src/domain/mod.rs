// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with ZERO external dependencies.
//!
//! This module contains pure domain types and their validity rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`timing`]: Delay types ([`DisplayThreshold`](timing::DisplayThreshold),
//!   [`MinimumDisplayTime`](timing::MinimumDisplayTime), [`FrameInterval`](timing::FrameInterval))

pub mod timing;
