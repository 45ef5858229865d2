//! Deck event loop
//!
//! Serializes input from every source (key matrix, encoder, IPC, stdin)
//! through one task so at most one action is in flight. Encoder turns
//! run inline when idle; input arriving during a key action goes through
//! the [`InputQueue`] policy.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::domain::deck::{Admission, DeckCommand, InputEvent, InputQueue};

use super::dispatcher::{ActionDispatcher, DispatchError};
use super::ports::{FeedbackSink, ProcessLauncher, ProviderGateway, TextIo};

/// Commands buffered between input sources and the loop
pub const COMMAND_BUFFER: usize = 32;

/// The event loop has stopped
#[derive(Debug, Clone, Copy, Error)]
#[error("Deck is not running")]
pub struct DeckClosed;

/// One command plus an optional reply slot for its admission
#[derive(Debug)]
pub struct Submission {
    pub command: DeckCommand,
    pub ack: Option<oneshot::Sender<Admission>>,
}

impl From<DeckCommand> for Submission {
    fn from(command: DeckCommand) -> Self {
        Self { command, ack: None }
    }
}

/// Cloneable sender side of the event loop
#[derive(Debug, Clone)]
pub struct DeckHandle {
    tx: mpsc::Sender<Submission>,
}

impl DeckHandle {
    /// Send an event and wait for the loop to admit, queue or refuse it
    pub async fn submit(&self, event: InputEvent) -> Result<Admission, DeckClosed> {
        let (ack, reply) = oneshot::channel();
        self.tx
            .send(Submission {
                command: DeckCommand::Input(event),
                ack: Some(ack),
            })
            .await
            .map_err(|_| DeckClosed)?;
        reply.await.map_err(|_| DeckClosed)
    }

    /// Send an event without waiting for its admission
    pub async fn send(&self, event: InputEvent) -> Result<(), DeckClosed> {
        self.tx
            .send(DeckCommand::Input(event).into())
            .await
            .map_err(|_| DeckClosed)
    }

    /// Ask the loop to finish the in-flight action and stop
    pub async fn shutdown(&self) -> Result<(), DeckClosed> {
        self.tx
            .send(DeckCommand::Shutdown.into())
            .await
            .map_err(|_| DeckClosed)
    }
}

/// Create the command channel feeding [`run_event_loop`]
pub fn deck_channel() -> (DeckHandle, mpsc::Receiver<Submission>) {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    (DeckHandle { tx }, rx)
}

type InFlight<'a> = Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + 'a>>;

/// Drive the dispatcher until shutdown or until every sender is dropped.
///
/// The in-flight action always runs to completion; a pending key press
/// left at shutdown is discarded.
pub async fn run_event_loop<F, T, G, L>(
    dispatcher: &ActionDispatcher<F, T, G, L>,
    commands: &mut mpsc::Receiver<Submission>,
) where
    F: FeedbackSink + 'static,
    T: TextIo,
    G: ProviderGateway,
    L: ProcessLauncher,
{
    let mut queue = InputQueue::new();
    let mut in_flight: Option<InFlight<'_>> = None;
    let mut stopping = false;

    loop {
        if in_flight.is_none() {
            if stopping {
                break;
            }
            if let Some(event) = queue.pop() {
                in_flight = Some(Box::pin(dispatcher.handle(event)));
                continue;
            }
        }

        tokio::select! {
            biased;

            result = drive(&mut in_flight) => {
                in_flight = None;
                if let Err(e) = result {
                    error!(error = %e, "action failed");
                }
            }
            submission = commands.recv(), if !stopping => {
                let Some(Submission { command, ack }) = submission else {
                    debug!("all input sources closed");
                    stopping = true;
                    continue;
                };

                match command {
                    DeckCommand::Shutdown => {
                        info!("shutdown requested");
                        stopping = true;
                    }
                    DeckCommand::Input(event) => {
                        let admission = queue.offer(event, in_flight.is_some());
                        match admission {
                            // Encoder turns never mark the loop busy
                            Admission::RunNow if !event.is_key() => {
                                if let Err(e) = dispatcher.handle(event).await {
                                    error!(error = %e, "adjust failed");
                                }
                            }
                            Admission::RunNow => {
                                in_flight = Some(Box::pin(dispatcher.handle(event)));
                            }
                            Admission::Queued => debug!(?event, "queued"),
                            Admission::Superseded(previous) => {
                                warn!(?previous, ?event, "pending key replaced")
                            }
                            Admission::Dropped => debug!(?event, "dropped while busy"),
                        }
                        if let Some(ack) = ack {
                            let _ = ack.send(admission);
                        }
                    }
                }
            }
        }
    }

    if let Some(event) = queue.pop() {
        warn!(?event, "stopping with a pending key, discarded");
    }
    dispatcher.settle().await;
    info!("deck stopped");
}

async fn drive<F>(slot: &mut Option<F>) -> F::Output
where
    F: Future + Unpin,
{
    match slot {
        Some(future) => future.await,
        None => std::future::pending().await,
    }
}
