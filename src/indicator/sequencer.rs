// SPDX-License-Identifier: MPL-2.0
//! Frame sequencer for image-based indicators.
//!
//! Advances a cursor through a fixed list of frames at a fixed cadence.
//! Once the cursor runs past the last frame nothing more is pushed, but the
//! tick keeps being re-armed until the sequencer is stopped, so the
//! animation freezes on the last rendered frame.

use super::{Frame, FrameAnimation, FrameSet};
use crate::domain::timing::FrameInterval;
use crate::scheduler::{Scheduler, Timer, TimerHandle};

/// Cursor over a frame set, driven by one-shot [`Timer::FrameTick`] timers.
#[derive(Debug, Clone)]
pub struct FrameSequencer {
    frames: FrameSet,
    interval: FrameInterval,
    cursor: usize,
    timer: Option<TimerHandle>,
}

impl FrameSequencer {
    /// Creates a stopped sequencer positioned at `start_cursor`.
    #[must_use]
    pub fn new(frames: FrameSet, interval: FrameInterval, start_cursor: usize) -> Self {
        Self {
            frames,
            interval,
            cursor: start_cursor,
            timer: None,
        }
    }

    /// Creates a stopped sequencer for an animation.
    #[must_use]
    pub fn for_animation(animation: &FrameAnimation) -> Self {
        Self::new(
            animation.frames.clone(),
            animation.interval,
            animation.start_cursor,
        )
    }

    /// Arms the first tick. Does nothing if already running.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        if self.timer.is_none() {
            self.timer = Some(scheduler.schedule(self.interval.as_duration(), Timer::FrameTick));
        }
    }

    /// Handles a fired tick and returns the frame to push, if any.
    ///
    /// Ticks from a handle other than the armed one are ignored, so a tick
    /// that fires after [`stop`](Self::stop) never pushes anything.
    pub fn tick(&mut self, handle: TimerHandle, scheduler: &mut dyn Scheduler) -> Option<&Frame> {
        if self.timer != Some(handle) {
            return None;
        }
        self.timer = Some(scheduler.schedule(self.interval.as_duration(), Timer::FrameTick));

        let index = self.cursor;
        self.cursor = self.cursor.saturating_add(1);
        self.frames.get(index)
    }

    /// Cancels the armed tick.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel(handle);
        }
    }

    /// Returns whether `handle` is this sequencer's armed tick.
    #[must_use]
    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.timer == Some(handle)
    }

    /// Index of the next frame to push.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns whether a tick is armed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Returns whether every frame has been pushed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}
