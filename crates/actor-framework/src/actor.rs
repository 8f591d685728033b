//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns a collection of entities and
//! processes requests for it one at a time. A `ResourceActor` is a single mutual-exclusion domain:
//! reads and writes for its store are serialized through its mailbox, so the store needs no lock.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceEvent, ResourceRequest};
use crate::session::shutdown_signal;
use std::collections::BTreeMap;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

/// Capacity of the event channel. Slow subscribers lag rather than block the actor.
const EVENT_CAPACITY: usize = 64;

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client`
///     (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Product>::new(32);
/// tokio::spawn(actor.run(()));
/// let id = client.create(ProductCreate { .. }).await?;
/// ```
///
/// # Implementation Details
///
/// Entities live in a `BTreeMap` keyed by id. Ids come from a `u32` counter, so iteration order is
/// creation order and `List` answers keep it.
///
/// * **Create**: mint id, `T::from_create_params`, `on_create`, insert, publish `Created`.
/// * **Get**: clone of the stored entity, or `None`.
/// * **List**: clones of every entity the filter accepts, in id order.
/// * **Update**: `on_update` on a copy; the copy replaces the stored entity only on success.
/// * **Delete**: `on_delete`, then remove, publish `Deleted`.
/// * **Action**: `handle_action` on a copy, committed only on success.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    events: broadcast::Sender<ResourceEvent<T::Id>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; when it is full, client calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let actor = Self {
            receiver,
            events: events.clone(),
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::with_events(sender, events);
        (actor, client)
    }

    fn publish(&self, event: ResourceEvent<T::Id>) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` argument is injected into every entity hook.
    pub async fn run(self, context: T::Context) {
        self.run_loop(context, None).await
    }

    /// Like [`run`](Self::run), but also stops once `shutdown` turns `true` or its sender is
    /// dropped, even while clients are still alive.
    pub async fn run_until(self, context: T::Context, shutdown: watch::Receiver<bool>) {
        self.run_loop(context, Some(shutdown)).await
    }

    async fn run_loop(mut self, context: T::Context, mut shutdown: Option<watch::Receiver<bool>>) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        loop {
            let msg = tokio::select! {
                biased;
                _ = shutdown_signal(&mut shutdown) => break,
                msg = self.receiver.recv() => match msg {
                    Some(msg) => msg,
                    None => break,
                },
            };
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            // Ids are only consumed by entities that made it into the store.
                            self.next_id += 1;
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            self.publish(ResourceEvent::Created(id.clone()));
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter.matches(item))
                        .cloned()
                        .collect();
                    debug!(entity_type, matched = items.len(), size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = current.clone();
                    if let Err(e) = draft.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), draft.clone());
                    info!(entity_type, %id, "Updated");
                    self.publish(ResourceEvent::Updated(id));
                    let _ = respond_to.send(Ok(draft));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        self.publish(ResourceEvent::Deleted(id));
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = current.clone();
                    match draft.handle_action(action, &context).await {
                        Ok(result) => {
                            self.store.insert(id.clone(), draft);
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
