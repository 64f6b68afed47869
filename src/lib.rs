// SPDX-License-Identifier: MPL-2.0
//! `iced_blocker` shows a full-screen blocking activity overlay without
//! flicker.
//!
//! The hard part is timing, handled by the [`presenter`]: the overlay is
//! mounted only after a display threshold, stays for at least a minimum
//! display time, and overlapping show/hide requests collapse into a single
//! mount/unmount pair. Drawing is left to a [`renderer::OverlayRenderer`];
//! image-based indicators are animated by the [`indicator::FrameSequencer`].
//!
//! Run the presenter deterministically with [`sim::Simulation`], or on tokio
//! with [`runtime::spawn`].

#![doc(html_root_url = "https://docs.rs/iced_blocker/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod indicator;
pub mod presenter;
pub mod renderer;
pub mod runtime;
pub mod scheduler;
pub mod sim;
