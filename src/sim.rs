// SPDX-License-Identifier: MPL-2.0
//! Deterministic harness running a [`Presenter`] on virtual time.
//!
//! Nothing sleeps: [`Simulation::advance_to`] fires every timer up to the
//! target time in deadline order, moving the clock to each deadline before
//! dispatching it. Useful for tests and for checking timing settings
//! without a runtime.
//!
//! # Example
//!
//! ```
//! use iced_blocker::presenter::{PhaseKind, PresentationRequest};
//! use iced_blocker::renderer::RecordingRenderer;
//! use iced_blocker::sim::Simulation;
//!
//! let mut sim = Simulation::new(RecordingRenderer::new());
//! sim.request_show(
//!     PresentationRequest::builder()
//!         .display_threshold_ms(500)
//!         .minimum_display_time_ms(1000)
//!         .build(),
//! );
//! sim.advance_to(100);
//! sim.request_hide();
//!
//! sim.advance_to(500);
//! assert!(sim.renderer().is_mounted());
//!
//! sim.advance_to(1500);
//! assert!(!sim.renderer().is_mounted());
//! assert_eq!(sim.phase(), PhaseKind::Idle);
//! ```

use crate::presenter::{Effect, Message, PhaseKind, PresentationRequest, Presenter};
use crate::renderer::OverlayRenderer;
use crate::scheduler::TimerQueue;
use std::time::Duration;

/// Effect produced while advancing, with the virtual time it happened at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEffect {
    /// Milliseconds since the simulation started.
    pub at_ms: u64,
    /// What happened.
    pub effect: Effect,
}

/// A presenter paired with a virtual-clock timer queue.
#[derive(Debug)]
pub struct Simulation<R> {
    presenter: Presenter<R>,
    queue: TimerQueue,
}

impl<R: OverlayRenderer> Simulation<R> {
    /// Creates an idle presenter at time zero.
    pub fn new(renderer: R) -> Self {
        Self {
            presenter: Presenter::new(renderer),
            queue: TimerQueue::new(),
        }
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.queue.now().as_millis()).unwrap_or(u64::MAX)
    }

    /// Dispatches a message at the current time.
    pub fn dispatch(&mut self, msg: Message) -> Effect {
        self.presenter.handle(msg, &mut self.queue)
    }

    /// See [`Presenter::request_show`].
    pub fn request_show(&mut self, request: PresentationRequest) -> Effect {
        self.dispatch(Message::Show(request))
    }

    /// See [`Presenter::request_hide`].
    pub fn request_hide(&mut self) -> Effect {
        self.dispatch(Message::Hide)
    }

    /// See [`Presenter::force_close`].
    pub fn force_close(&mut self) -> Effect {
        self.dispatch(Message::ForceClose)
    }

    /// Fires every timer due at or before `ms` and moves the clock there.
    ///
    /// Returns the effects that were not [`Effect::Ignored`], in order.
    pub fn advance_to(&mut self, ms: u64) -> Vec<TimedEffect> {
        let limit = Duration::from_millis(ms);
        let mut effects = Vec::new();
        while let Some(fired) = self.queue.pop_due_until(limit) {
            let effect = self
                .presenter
                .timer_fired(fired.handle, fired.timer, &mut self.queue);
            if effect != Effect::Ignored {
                effects.push(TimedEffect {
                    at_ms: self.now_ms(),
                    effect,
                });
            }
        }
        self.queue.set_now(limit);
        effects
    }

    /// Advances the clock by `ms`.
    pub fn advance_by(&mut self, ms: u64) -> Vec<TimedEffect> {
        self.advance_to(self.now_ms().saturating_add(ms))
    }

    /// Cancels every timer and unmounts the overlay if needed.
    pub fn teardown(&mut self) -> Effect {
        self.presenter.teardown(&mut self.queue)
    }

    /// Current presenter phase.
    #[must_use]
    pub fn phase(&self) -> PhaseKind {
        self.presenter.phase()
    }

    /// The presenter.
    #[must_use]
    pub fn presenter(&self) -> &Presenter<R> {
        &self.presenter
    }

    /// The timer queue.
    #[must_use]
    pub fn queue(&self) -> &TimerQueue {
        &self.queue
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        self.presenter.renderer()
    }
}
