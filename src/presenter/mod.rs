// SPDX-License-Identifier: MPL-2.0
//! Presentation timing for the blocking overlay.
//!
//! The [`Presenter`] decides when the overlay is actually mounted and when it
//! may be removed, given `request_show` / `request_hide` calls that can
//! arrive in any order and two delays carried by the request:
//!
//! - the **display threshold**: the overlay is mounted only once it elapses,
//!   so work that finishes quickly does not leave a blocker up;
//! - the **minimum display time**: once mounted, the overlay stays for at
//!   least this long, so it never vanishes within a frame of appearing.
//!
//! ```text
//!            request_show            threshold fired
//!   Idle ─────────────────▶ PendingShow ─────────────▶ Visible ──┐
//!    ▲                          │ (hide requested)        │      │ request_hide
//!    │                          └────────────────▶ PendingHide ◀─┘ (minimum armed)
//!    │      minimum fired / request_hide after minimum      │
//!    └──────────────────────────────────────────────────────┘
//! ```
//!
//! Once the threshold fires, the overlay is mounted even if hide was already
//! requested; it then stays for the minimum display time. Short work that
//! outlives the threshold therefore always produces a full-minimum flash.
//!
//! Every transition happens inside a method call on one `Presenter`; callers
//! on several threads go through [`crate::runtime`], which serializes them.

mod request;

pub use request::{ForceCloseCallback, PresentationRequest, RequestBuilder};

use crate::indicator::FrameSequencer;
use crate::renderer::{OverlayHandle, OverlayRenderer};
use crate::scheduler::{Scheduler, Timer, TimerHandle};
use std::mem;

/// Observable phase of the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    /// Nothing mounted, no timer armed.
    Idle,
    /// Waiting for the display threshold.
    PendingShow,
    /// Mounted and not asked to hide yet (or minimum already elapsed).
    Visible,
    /// Mounted, asked to hide, waiting for the minimum display time.
    PendingHide,
}

/// Messages accepted by [`Presenter::handle`].
#[derive(Debug, Clone)]
pub enum Message {
    /// Show the overlay for this request.
    Show(PresentationRequest),
    /// Work is done; remove the overlay as soon as allowed.
    Hide,
    /// User dismissed the overlay.
    ForceClose,
    /// A timer armed by the presenter fired.
    TimerFired(TimerHandle, Timer),
}

/// Effects produced by a presenter message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The message was dropped by policy (busy, idle, stale timer, not closeable).
    Ignored,
    /// State changed; nothing was rendered.
    None,
    /// The overlay was mounted.
    Mounted(OverlayHandle),
    /// The overlay was unmounted.
    Unmounted(OverlayHandle),
    /// A new indicator frame was pushed.
    FramePushed,
}

/// Overlay currently attached by the renderer.
#[derive(Debug)]
struct Mounted {
    request: PresentationRequest,
    overlay: OverlayHandle,
    sequencer: Option<FrameSequencer>,
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    PendingShow {
        request: PresentationRequest,
        timer: TimerHandle,
        hide_requested: bool,
    },
    Visible {
        mounted: Mounted,
        /// `None` once the minimum display time has elapsed.
        minimum_timer: Option<TimerHandle>,
    },
    PendingHide {
        mounted: Mounted,
        timer: TimerHandle,
    },
}

/// Show/hide state machine driving an [`OverlayRenderer`].
///
/// Only one overlay exists at a time: show requests arriving while a cycle
/// is in progress are dropped, never queued.
#[derive(Debug)]
pub struct Presenter<R> {
    renderer: R,
    phase: Phase,
}

impl<R: OverlayRenderer> Presenter<R> {
    /// Creates an idle presenter drawing through `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            phase: Phase::Idle,
        }
    }

    /// Handles a presenter message.
    ///
    /// Note: Takes `Message` by value following Iced's `update(message: Message)` pattern.
    pub fn handle(&mut self, msg: Message, scheduler: &mut dyn Scheduler) -> Effect {
        match msg {
            Message::Show(request) => self.request_show(request, scheduler),
            Message::Hide => self.request_hide(scheduler),
            Message::ForceClose => self.force_close(scheduler),
            Message::TimerFired(handle, timer) => self.timer_fired(handle, timer, scheduler),
        }
    }

    /// Starts a show/hide cycle.
    ///
    /// Returns [`Effect::Ignored`] if a cycle is already in progress. The
    /// overlay is never mounted from inside this call, even with a zero
    /// threshold, so a hide issued right after is always observed.
    pub fn request_show(
        &mut self,
        request: PresentationRequest,
        scheduler: &mut dyn Scheduler,
    ) -> Effect {
        if !matches!(self.phase, Phase::Idle) {
            tracing::debug!(phase = ?self.phase(), "show request dropped, overlay busy");
            return Effect::Ignored;
        }

        let threshold = request.display_threshold();
        let timer = scheduler.schedule(threshold.as_duration(), Timer::ShowThreshold);
        tracing::debug!(threshold_ms = threshold.value(), "overlay pending show");
        self.phase = Phase::PendingShow {
            request,
            timer,
            hide_requested: false,
        };
        Effect::None
    }

    /// Asks for the overlay to go away as soon as the minimum display time allows.
    pub fn request_hide(&mut self, scheduler: &mut dyn Scheduler) -> Effect {
        let (phase, effect) = match mem::take(&mut self.phase) {
            Phase::Idle => (Phase::Idle, Effect::Ignored),
            // The threshold timer keeps running: the overlay is still mounted
            // when it fires and then removed after the minimum display time.
            Phase::PendingShow { request, timer, .. } => {
                tracing::debug!("hide requested before threshold");
                (
                    Phase::PendingShow {
                        request,
                        timer,
                        hide_requested: true,
                    },
                    Effect::None,
                )
            }
            Phase::Visible {
                mounted,
                minimum_timer: None,
            } => {
                let overlay = self.unmount(mounted, scheduler);
                (Phase::Idle, Effect::Unmounted(overlay))
            }
            Phase::Visible {
                mounted,
                minimum_timer: Some(timer),
            } => {
                tracing::debug!("hide requested, waiting for minimum display time");
                (Phase::PendingHide { mounted, timer }, Effect::None)
            }
            phase @ Phase::PendingHide { .. } => (phase, Effect::Ignored),
        };
        self.phase = phase;
        effect
    }

    /// Dismisses the overlay on user request, bypassing the minimum display time.
    ///
    /// Only possible while the overlay is mounted and its request is
    /// closeable. Runs the request's force-close callback exactly once.
    pub fn force_close(&mut self, scheduler: &mut dyn Scheduler) -> Effect {
        let closeable = self
            .mounted()
            .is_some_and(|mounted| mounted.request.visual().closeable);
        if !closeable {
            return Effect::Ignored;
        }

        let (mounted, timer) = match mem::take(&mut self.phase) {
            Phase::Visible {
                mounted,
                minimum_timer,
            } => (mounted, minimum_timer),
            Phase::PendingHide { mounted, timer } => (mounted, Some(timer)),
            phase => {
                self.phase = phase;
                return Effect::Ignored;
            }
        };

        tracing::debug!("overlay force-closed");
        mounted.request.notify_force_close();
        if let Some(timer) = timer {
            scheduler.cancel(timer);
        }
        let overlay = self.unmount(mounted, scheduler);
        Effect::Unmounted(overlay)
    }

    /// Routes a fired timer. Timers the presenter no longer waits for are ignored.
    pub fn timer_fired(
        &mut self,
        handle: TimerHandle,
        timer: Timer,
        scheduler: &mut dyn Scheduler,
    ) -> Effect {
        match timer {
            Timer::ShowThreshold => self.show_threshold_elapsed(handle, scheduler),
            Timer::MinimumDisplay => self.minimum_elapsed(handle, scheduler),
            Timer::FrameTick => self.frame_tick(handle, scheduler),
        }
    }

    /// Cancels every armed timer and unmounts the overlay if it is mounted.
    pub fn teardown(&mut self, scheduler: &mut dyn Scheduler) -> Effect {
        match mem::take(&mut self.phase) {
            Phase::Idle => Effect::None,
            Phase::PendingShow { timer, .. } => {
                scheduler.cancel(timer);
                tracing::debug!("pending show cancelled by teardown");
                Effect::None
            }
            Phase::Visible {
                mounted,
                minimum_timer,
            } => {
                if let Some(timer) = minimum_timer {
                    scheduler.cancel(timer);
                }
                Effect::Unmounted(self.unmount(mounted, scheduler))
            }
            Phase::PendingHide { mounted, timer } => {
                scheduler.cancel(timer);
                Effect::Unmounted(self.unmount(mounted, scheduler))
            }
        }
    }

    fn show_threshold_elapsed(
        &mut self,
        handle: TimerHandle,
        scheduler: &mut dyn Scheduler,
    ) -> Effect {
        let (request, hide_requested) = match mem::take(&mut self.phase) {
            Phase::PendingShow {
                request,
                timer,
                hide_requested,
            } if timer == handle => (request, hide_requested),
            phase => {
                self.phase = phase;
                return Effect::Ignored;
            }
        };

        let overlay = self.renderer.mount(request.visual());
        let minimum = request.minimum_display_time();
        let timer = scheduler.schedule(minimum.as_duration(), Timer::MinimumDisplay);
        let sequencer = request.visual().indicator.animation().map(|animation| {
            let mut sequencer = FrameSequencer::for_animation(animation);
            sequencer.start(scheduler);
            sequencer
        });
        tracing::debug!(
            overlay = overlay.raw(),
            minimum_ms = minimum.value(),
            hide_requested,
            "overlay mounted"
        );

        let mounted = Mounted {
            request,
            overlay,
            sequencer,
        };
        self.phase = if hide_requested {
            Phase::PendingHide { mounted, timer }
        } else {
            Phase::Visible {
                mounted,
                minimum_timer: Some(timer),
            }
        };
        Effect::Mounted(overlay)
    }

    fn minimum_elapsed(&mut self, handle: TimerHandle, scheduler: &mut dyn Scheduler) -> Effect {
        let (phase, effect) = match mem::take(&mut self.phase) {
            Phase::Visible {
                mounted,
                minimum_timer: Some(timer),
            } if timer == handle => {
                tracing::debug!("minimum display time elapsed, waiting for hide");
                (
                    Phase::Visible {
                        mounted,
                        minimum_timer: None,
                    },
                    Effect::None,
                )
            }
            Phase::PendingHide { mounted, timer } if timer == handle => {
                let overlay = self.unmount(mounted, scheduler);
                (Phase::Idle, Effect::Unmounted(overlay))
            }
            phase => (phase, Effect::Ignored),
        };
        self.phase = phase;
        effect
    }

    fn frame_tick(&mut self, handle: TimerHandle, scheduler: &mut dyn Scheduler) -> Effect {
        let mounted = match &mut self.phase {
            Phase::Visible { mounted, .. } | Phase::PendingHide { mounted, .. } => mounted,
            _ => return Effect::Ignored,
        };
        let overlay = mounted.overlay;
        let Some(sequencer) = mounted.sequencer.as_mut() else {
            return Effect::Ignored;
        };
        if !sequencer.owns(handle) {
            return Effect::Ignored;
        }
        match sequencer.tick(handle, scheduler) {
            Some(frame) => {
                tracing::trace!(frame = frame.name(), "indicator frame");
                self.renderer.push_frame(overlay, frame);
                Effect::FramePushed
            }
            None => Effect::None,
        }
    }

    /// Stops the animation and removes the overlay. The caller moves the
    /// presenter to `Idle`.
    fn unmount(&mut self, mut mounted: Mounted, scheduler: &mut dyn Scheduler) -> OverlayHandle {
        if let Some(sequencer) = mounted.sequencer.as_mut() {
            sequencer.stop(scheduler);
        }
        self.renderer.unmount(mounted.overlay);
        tracing::debug!(overlay = mounted.overlay.raw(), "overlay unmounted");
        mounted.overlay
    }

    fn mounted(&self) -> Option<&Mounted> {
        match &self.phase {
            Phase::Visible { mounted, .. } | Phase::PendingHide { mounted, .. } => Some(mounted),
            Phase::Idle | Phase::PendingShow { .. } => None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> PhaseKind {
        match self.phase {
            Phase::Idle => PhaseKind::Idle,
            Phase::PendingShow { .. } => PhaseKind::PendingShow,
            Phase::Visible { .. } => PhaseKind::Visible,
            Phase::PendingHide { .. } => PhaseKind::PendingHide,
        }
    }

    /// Returns whether a hide was requested and not yet carried out.
    #[must_use]
    pub fn hide_requested(&self) -> bool {
        match self.phase {
            Phase::PendingShow { hide_requested, .. } => hide_requested,
            Phase::PendingHide { .. } => true,
            Phase::Idle | Phase::Visible { .. } => false,
        }
    }

    /// Returns whether the minimum display time of the mounted overlay has elapsed.
    #[must_use]
    pub fn minimum_elapsed_since_mount(&self) -> bool {
        matches!(
            self.phase,
            Phase::Visible {
                minimum_timer: None,
                ..
            }
        )
    }

    /// Request governing the current cycle.
    #[must_use]
    pub fn active_request(&self) -> Option<&PresentationRequest> {
        match &self.phase {
            Phase::Idle => None,
            Phase::PendingShow { request, .. } => Some(request),
            Phase::Visible { mounted, .. } | Phase::PendingHide { mounted, .. } => {
                Some(&mounted.request)
            }
        }
    }

    /// Handle of the mounted overlay.
    #[must_use]
    pub fn overlay(&self) -> Option<OverlayHandle> {
        self.mounted().map(|mounted| mounted.overlay)
    }

    /// Cursor of the running frame sequencer, if the indicator is frame-based.
    #[must_use]
    pub fn frame_cursor(&self) -> Option<usize> {
        self.mounted()
            .and_then(|mounted| mounted.sequencer.as_ref())
            .map(FrameSequencer::cursor)
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Gives the renderer back. Call [`teardown`](Self::teardown) first if a
    /// cycle may still be in progress.
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingRenderer;
    use crate::scheduler::TimerQueue;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn request(threshold: u32, minimum: u32) -> PresentationRequest {
        PresentationRequest::builder()
            .display_threshold_ms(threshold)
            .minimum_display_time_ms(minimum)
            .build()
    }

    /// Fires every timer due at or before `ms`.
    fn advance(presenter: &mut Presenter<RecordingRenderer>, queue: &mut TimerQueue, ms: u64) {
        let limit = Duration::from_millis(ms);
        while let Some(fired) = queue.pop_due_until(limit) {
            presenter.timer_fired(fired.handle, fired.timer, queue);
        }
        queue.set_now(limit);
    }

    #[test]
    fn show_waits_for_threshold() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());

        assert_eq!(presenter.request_show(request(500, 0), &mut queue), Effect::None);
        assert_eq!(presenter.phase(), PhaseKind::PendingShow);
        assert!(presenter.active_request().is_some());

        advance(&mut presenter, &mut queue, 499);
        assert_eq!(presenter.renderer().mount_count(), 0);

        advance(&mut presenter, &mut queue, 500);
        assert_eq!(presenter.renderer().mount_count(), 1);
        assert_eq!(presenter.phase(), PhaseKind::Visible);
    }

    #[test]
    fn zero_threshold_never_mounts_inline() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());

        presenter.request_show(request(0, 100), &mut queue);
        assert_eq!(presenter.renderer().mount_count(), 0);
        assert_eq!(presenter.phase(), PhaseKind::PendingShow);
    }

    #[test]
    fn second_show_is_ignored() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());

        presenter.request_show(request(100, 0), &mut queue);
        assert_eq!(
            presenter.request_show(request(10, 0), &mut queue),
            Effect::Ignored
        );
        assert_eq!(queue.len(), 1);
        assert_eq!(
            presenter.active_request().map(|r| r.display_threshold().value()),
            Some(100)
        );
    }

    #[test]
    fn hide_while_idle_is_ignored() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());

        assert_eq!(presenter.request_hide(&mut queue), Effect::Ignored);
        assert_eq!(presenter.phase(), PhaseKind::Idle);
        assert!(presenter.renderer().events().is_empty());
    }

    #[test]
    fn hide_before_threshold_keeps_show_timer() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());

        presenter.request_show(request(500, 1000), &mut queue);
        presenter.request_hide(&mut queue);

        assert!(presenter.hide_requested());
        assert_eq!(presenter.phase(), PhaseKind::PendingShow);
        assert_eq!(queue.len(), 1);

        advance(&mut presenter, &mut queue, 500);
        assert_eq!(presenter.phase(), PhaseKind::PendingHide);
        assert!(presenter.renderer().is_mounted());
    }

    #[test]
    fn hide_after_minimum_unmounts_immediately() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());

        presenter.request_show(request(0, 200), &mut queue);
        advance(&mut presenter, &mut queue, 300);
        assert!(presenter.minimum_elapsed_since_mount());
        assert!(queue.is_empty());

        let effect = presenter.request_hide(&mut queue);
        assert!(matches!(effect, Effect::Unmounted(_)));
        assert_eq!(presenter.phase(), PhaseKind::Idle);
        assert!(presenter.active_request().is_none());
    }

    #[test]
    fn repeated_hide_unmounts_once() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());

        presenter.request_show(request(0, 100), &mut queue);
        advance(&mut presenter, &mut queue, 0);
        presenter.request_hide(&mut queue);
        assert_eq!(presenter.request_hide(&mut queue), Effect::Ignored);
        advance(&mut presenter, &mut queue, 100);
        assert_eq!(presenter.request_hide(&mut queue), Effect::Ignored);

        assert_eq!(presenter.renderer().unmount_count(), 1);
    }

    #[test]
    fn force_close_requires_closeable_request() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());

        presenter.request_show(request(0, 1000), &mut queue);
        advance(&mut presenter, &mut queue, 0);

        assert_eq!(presenter.force_close(&mut queue), Effect::Ignored);
        assert_eq!(presenter.phase(), PhaseKind::Visible);
    }

    #[test]
    fn force_close_is_ignored_before_mount() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());
        let closeable = PresentationRequest::builder()
            .display_threshold_ms(100)
            .closeable(true)
            .build();

        presenter.request_show(closeable, &mut queue);
        assert_eq!(presenter.force_close(&mut queue), Effect::Ignored);
        assert_eq!(presenter.phase(), PhaseKind::PendingShow);
    }

    #[test]
    fn force_close_bypasses_minimum_and_notifies_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());
        let closeable = PresentationRequest::builder()
            .minimum_display_time_ms(1000)
            .closeable(true)
            .on_force_close(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        presenter.request_show(closeable, &mut queue);
        advance(&mut presenter, &mut queue, 10);

        assert!(matches!(presenter.force_close(&mut queue), Effect::Unmounted(_)));
        assert_eq!(presenter.force_close(&mut queue), Effect::Ignored);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(presenter.phase(), PhaseKind::Idle);
        assert!(queue.is_empty());
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());

        let effect = presenter.timer_fired(
            TimerHandle::from_raw(42),
            Timer::ShowThreshold,
            &mut queue,
        );
        assert_eq!(effect, Effect::Ignored);
        assert_eq!(presenter.renderer().mount_count(), 0);
    }

    #[test]
    fn teardown_unmounts_and_cancels() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());

        presenter.request_show(request(0, 1000), &mut queue);
        advance(&mut presenter, &mut queue, 0);
        assert!(matches!(presenter.teardown(&mut queue), Effect::Unmounted(_)));
        assert!(queue.is_empty());
        assert_eq!(presenter.phase(), PhaseKind::Idle);
        assert_eq!(presenter.renderer().unmount_count(), 1);
    }

    #[test]
    fn teardown_before_mount_renders_nothing() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());

        presenter.request_show(request(100, 0), &mut queue);
        assert_eq!(presenter.teardown(&mut queue), Effect::None);
        assert!(queue.is_empty());
        assert!(presenter.renderer().events().is_empty());
    }

    #[test]
    fn handle_dispatches_messages() {
        let mut queue = TimerQueue::new();
        let mut presenter = Presenter::new(RecordingRenderer::new());

        presenter.handle(Message::Show(request(0, 0)), &mut queue);
        let fired = queue.pop_due().expect("threshold armed");
        let effect = presenter.handle(Message::TimerFired(fired.handle, fired.timer), &mut queue);
        assert!(matches!(effect, Effect::Mounted(_)));

        let fired = queue.pop_due().expect("minimum armed");
        presenter.handle(Message::TimerFired(fired.handle, fired.timer), &mut queue);
        assert!(matches!(
            presenter.handle(Message::Hide, &mut queue),
            Effect::Unmounted(_)
        ));
    }
}
