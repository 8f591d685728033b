//! # Generic Messages
//!
//! The request type a `ResourceClient` sends to its `ResourceActor`, and the events the actor
//! publishes after each committed mutation.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A predicate evaluated inside the actor to select entities for a `List` request.
pub struct Filter<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    /// A filter that keeps everything.
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Internal message type sent to the actor to request operations.
///
/// The variants are the CRUD lifecycle of a resource, a `List` query over the whole store, and a
/// custom `Action` for resource-specific logic. Every payload is typed by the entity's associated
/// types, so a `ProductCreate` can never reach the order actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// Entities matching the filter, in id order.
    List {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

/// Notification published by a `ResourceActor` after a mutation has been committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceEvent<Id> {
    Created(Id),
    Updated(Id),
    Deleted(Id),
}

impl<Id> ResourceEvent<Id> {
    pub fn id(&self) -> &Id {
        match self {
            ResourceEvent::Created(id)
            | ResourceEvent::Updated(id)
            | ResourceEvent::Deleted(id) => id,
        }
    }
}
