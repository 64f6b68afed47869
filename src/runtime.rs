// SPDX-License-Identifier: MPL-2.0
//! Tokio driver for the presenter.
//!
//! [`spawn`] moves a [`Presenter`] and its timer queue onto a single task.
//! Every request and every timer fire is handled on that task, in order, so
//! callers on any thread share one serialized presenter through cheap
//! [`PresenterHandle`] clones.
//!
//! The task sleeps until the next timer deadline or the next request,
//! whichever comes first. Timers already due are always fired before a newly
//! received request is handled.

use crate::error::{Error, Result};
use crate::presenter::{Message, PhaseKind, PresentationRequest, Presenter};
use crate::renderer::OverlayRenderer;
use crate::scheduler::TimerQueue;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Requests sent to the runtime task.
#[derive(Debug)]
enum Command {
    Dispatch(Message),
    Phase(oneshot::Sender<PhaseKind>),
    Shutdown,
}

/// Handle for sending requests to the presenter task.
///
/// This handle is cheap to clone and can be shared across threads.
/// Sending never blocks; effects land asynchronously on the task.
#[derive(Debug, Clone)]
pub struct PresenterHandle {
    command_tx: mpsc::UnboundedSender<Command>,
}

impl PresenterHandle {
    fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::RuntimeClosed)
    }

    /// Starts a show/hide cycle. Dropped by the presenter if one is in progress.
    pub fn request_show(&self, request: PresentationRequest) -> Result<()> {
        self.send(Command::Dispatch(Message::Show(request)))
    }

    /// Asks for the overlay to go away as soon as allowed.
    pub fn request_hide(&self) -> Result<()> {
        self.send(Command::Dispatch(Message::Hide))
    }

    /// Dismisses a closeable overlay immediately.
    pub fn force_close(&self) -> Result<()> {
        self.send(Command::Dispatch(Message::ForceClose))
    }

    /// Current presenter phase, as seen by the task.
    pub async fn phase(&self) -> Result<PhaseKind> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Phase(reply_tx))?;
        reply_rx.await.map_err(|_| Error::RuntimeClosed)
    }

    /// Tears the presenter down (timers cancelled, overlay unmounted) and
    /// stops the task. Other handles fail with [`Error::RuntimeClosed`] afterwards.
    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }
}

/// Spawns the presenter task on the current tokio runtime.
///
/// The task ends after [`PresenterHandle::shutdown`] or once every handle is
/// dropped; in both cases the presenter is torn down first. The join handle
/// gives the renderer back.
pub fn spawn<R>(renderer: R) -> (PresenterHandle, JoinHandle<R>)
where
    R: OverlayRenderer + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(Presenter::new(renderer), command_rx));
    (PresenterHandle { command_tx }, task)
}

async fn run<R: OverlayRenderer>(
    mut presenter: Presenter<R>,
    mut command_rx: mpsc::UnboundedReceiver<Command>,
) -> R {
    let origin = Instant::now();
    let mut queue = TimerQueue::new();
    tracing::debug!("presenter runtime started");

    loop {
        fire_due(&mut presenter, &mut queue, origin);

        let command = tokio::select! {
            command = command_rx.recv() => command,
            () = sleep_until_deadline(origin, queue.next_deadline()) => continue,
        };

        fire_due(&mut presenter, &mut queue, origin);
        match command {
            Some(Command::Dispatch(msg)) => {
                presenter.handle(msg, &mut queue);
            }
            Some(Command::Phase(reply_tx)) => {
                let _ = reply_tx.send(presenter.phase());
            }
            Some(Command::Shutdown) | None => break,
        }
    }

    presenter.teardown(&mut queue);
    tracing::debug!("presenter runtime stopped");
    presenter.into_renderer()
}

fn fire_due<R: OverlayRenderer>(
    presenter: &mut Presenter<R>,
    queue: &mut TimerQueue,
    origin: Instant,
) {
    queue.set_now(origin.elapsed());
    while let Some(fired) = queue.pop_due() {
        presenter.timer_fired(fired.handle, fired.timer, queue);
    }
}

async fn sleep_until_deadline(origin: Instant, deadline: Option<Duration>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(origin + deadline).await,
        None => std::future::pending().await,
    }
}
