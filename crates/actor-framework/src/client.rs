//! # Generic Client
//!
//! This module defines the generic client for communicating with a `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceEvent, ResourceRequest};
use tokio::sync::{broadcast, mpsc, oneshot};

/// A type-safe, cloneable handle to a `ResourceActor<T>`.
///
/// Each call sends one request over the actor's mailbox and waits on a oneshot reply. Cloning is
/// cheap: a clone holds only channel senders.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    events: Option<broadcast::Sender<ResourceEvent<T::Id>>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            events: self.events.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    /// A client without an event feed, as used by mocks.
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self {
            sender,
            events: None,
        }
    }

    pub(crate) fn with_events(
        sender: mpsc::Sender<ResourceRequest<T>>,
        events: broadcast::Sender<ResourceEvent<T::Id>>,
    ) -> Self {
        Self {
            sender,
            events: Some(events),
        }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// Entities accepted by `filter`, in creation order.
    pub async fn list(&self, filter: Filter<T>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { filter, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Subscribes to committed mutations. Mock clients have no feed and return `None`.
    pub fn subscribe(&self) -> Option<broadcast::Receiver<ResourceEvent<T::Id>>> {
        self.events.as_ref().map(broadcast::Sender::subscribe)
    }
}
