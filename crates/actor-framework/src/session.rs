//! # Session Actors
//!
//! A `ResourceActor` serializes every request for a whole collection. Some state belongs to a
//! single owner instead, such as one shopper's cart. A `SessionActor` owns exactly one value of
//! such state and runs in its own task, so each session gets exclusive access to its state while
//! different sessions proceed in parallel.
//!
//! Commands run against a copy of the state; the copy replaces the live state only when the
//! handler returns `Ok`. A failed command leaves no trace.

use crate::error::FrameworkError;
use crate::message::Response;
use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

/// State owned by a single session.
#[async_trait]
pub trait SessionState: Clone + Send + Sync + 'static {
    /// Requests the session understands.
    type Command: Send + Debug;

    /// Answer to a command.
    type Reply: Send + Debug;

    /// Dependencies injected when the session is started.
    type Context: Send + Sync;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Handle one command. May await other actors through the context.
    async fn handle(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Self::Reply, Self::Error>;
}

/// A command paired with its reply channel.
#[derive(Debug)]
pub struct SessionRequest<S: SessionState> {
    pub command: S::Command,
    pub respond_to: Response<S::Reply>,
}

/// The actor that owns one session's state.
pub struct SessionActor<S: SessionState> {
    label: String,
    receiver: mpsc::Receiver<SessionRequest<S>>,
    state: S,
}

impl<S: SessionState> SessionActor<S> {
    /// Creates the actor around `state` and the client used to reach it.
    ///
    /// `label` identifies the session in logs.
    pub fn new(label: impl Into<String>, state: S, buffer_size: usize) -> (Self, SessionClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            label: label.into(),
            receiver,
            state,
        };
        (actor, SessionClient { sender })
    }

    /// Runs until every client is dropped.
    pub async fn run(self, context: S::Context) {
        self.run_loop(context, None).await
    }

    /// Runs until every client is dropped or `shutdown` turns `true` (or its sender goes away).
    pub async fn run_until(self, context: S::Context, shutdown: watch::Receiver<bool>) {
        self.run_loop(context, Some(shutdown)).await
    }

    async fn run_loop(mut self, context: S::Context, mut shutdown: Option<watch::Receiver<bool>>) {
        let session = self.label.clone();
        info!(%session, "Session started");

        loop {
            let request = tokio::select! {
                biased;
                _ = shutdown_signal(&mut shutdown) => {
                    debug!(%session, "Shutdown signalled");
                    break;
                }
                request = self.receiver.recv() => match request {
                    Some(request) => request,
                    None => break,
                },
            };

            let SessionRequest {
                command,
                respond_to,
            } = request;
            debug!(%session, ?command, "Command");

            let mut draft = self.state.clone();
            match draft.handle(command, &context).await {
                Ok(reply) => {
                    self.state = draft;
                    let _ = respond_to.send(Ok(reply));
                }
                Err(e) => {
                    warn!(%session, error = %e, "Command failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                }
            }
        }

        info!(%session, "Session closed");
    }
}

/// Resolves once shutdown is requested. Never resolves without a shutdown channel.
pub(crate) async fn shutdown_signal(shutdown: &mut Option<watch::Receiver<bool>>) {
    let Some(rx) = shutdown else {
        return std::future::pending().await;
    };
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}

/// Cloneable handle to a `SessionActor`.
pub struct SessionClient<S: SessionState> {
    sender: mpsc::Sender<SessionRequest<S>>,
}

impl<S: SessionState> Clone for SessionClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: SessionState> SessionClient<S> {
    /// Wraps a raw sender; used by tests that play the actor themselves.
    pub fn new(sender: mpsc::Sender<SessionRequest<S>>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, command: S::Command) -> Result<S::Reply, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// True once the session actor has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
