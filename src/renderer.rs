// SPDX-License-Identifier: MPL-2.0
//! Overlay renderer contract and two headless renderers.
//!
//! The presenter only ever asks a renderer to mount an overlay, push a frame
//! into a mounted overlay, or unmount it. It guarantees one `unmount` per
//! `mount` and never calls `unmount` without a preceding `mount`.

use crate::indicator::{Frame, VisualParams};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle of one mounted overlay, assigned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(u64);

impl OverlayHandle {
    /// Wraps a raw renderer-assigned id.
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

/// Draws and removes the blocking overlay.
pub trait OverlayRenderer {
    /// Attaches the overlay described by `params` and returns its handle.
    fn mount(&mut self, params: &VisualParams) -> OverlayHandle;

    /// Removes a mounted overlay.
    fn unmount(&mut self, handle: OverlayHandle);

    /// Replaces the indicator image of a mounted frame-based overlay.
    fn push_frame(&mut self, _handle: OverlayHandle, _frame: &Frame) {}
}

/// Something the presenter asked a [`RecordingRenderer`] to do.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    /// Overlay attached.
    Mount {
        handle: OverlayHandle,
        params: VisualParams,
    },
    /// Overlay removed.
    Unmount { handle: OverlayHandle },
    /// Frame pushed into a mounted overlay.
    Frame { handle: OverlayHandle, name: String },
}

#[derive(Debug, Default)]
struct Recording {
    next_handle: u64,
    events: Vec<RenderEvent>,
}

/// Renderer that only records calls.
///
/// Clones share the same recording, so a test can keep one clone while the
/// presenter (or the runtime task) owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    recording: Arc<Mutex<Recording>>,
}

impl RecordingRenderer {
    /// Creates an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.recording
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// All recorded calls, in order.
    #[must_use]
    pub fn events(&self) -> Vec<RenderEvent> {
        self.lock().events.clone()
    }

    /// Number of `mount` calls.
    #[must_use]
    pub fn mount_count(&self) -> usize {
        self.lock()
            .events
            .iter()
            .filter(|event| matches!(event, RenderEvent::Mount { .. }))
            .count()
    }

    /// Number of `unmount` calls.
    #[must_use]
    pub fn unmount_count(&self) -> usize {
        self.lock()
            .events
            .iter()
            .filter(|event| matches!(event, RenderEvent::Unmount { .. }))
            .count()
    }

    /// Returns whether an overlay is currently attached.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mount_count() > self.unmount_count()
    }

    /// Names of pushed frames, in order.
    #[must_use]
    pub fn frames(&self) -> Vec<String> {
        self.lock()
            .events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Frame { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Forgets every recorded call.
    pub fn clear(&self) {
        self.lock().events.clear();
    }
}

impl OverlayRenderer for RecordingRenderer {
    fn mount(&mut self, params: &VisualParams) -> OverlayHandle {
        let mut recording = self.lock();
        let handle = OverlayHandle::from_raw(recording.next_handle);
        recording.next_handle += 1;
        recording.events.push(RenderEvent::Mount {
            handle,
            params: params.clone(),
        });
        handle
    }

    fn unmount(&mut self, handle: OverlayHandle) {
        self.lock().events.push(RenderEvent::Unmount { handle });
    }

    fn push_frame(&mut self, handle: OverlayHandle, frame: &Frame) {
        self.lock().events.push(RenderEvent::Frame {
            handle,
            name: frame.name().to_string(),
        });
    }
}

/// Renderer that reports every call through `tracing`.
#[derive(Debug, Default)]
pub struct TracingRenderer {
    next_handle: u64,
}

impl OverlayRenderer for TracingRenderer {
    fn mount(&mut self, params: &VisualParams) -> OverlayHandle {
        let handle = OverlayHandle::from_raw(self.next_handle);
        self.next_handle += 1;
        tracing::info!(
            overlay = handle.raw(),
            text = params.visible_message().unwrap_or_default(),
            blocking = params.blocking_screen,
            closeable = params.closeable,
            "overlay mounted"
        );
        handle
    }

    fn unmount(&mut self, handle: OverlayHandle) {
        tracing::info!(overlay = handle.raw(), "overlay unmounted");
    }

    fn push_frame(&mut self, handle: OverlayHandle, frame: &Frame) {
        tracing::info!(overlay = handle.raw(), frame = frame.name(), "frame");
    }
}
