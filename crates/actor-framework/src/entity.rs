//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a resource (a catalog product, a placed order, ...)
//! implements to be kept by the generic [`ResourceActor`](crate::ResourceActor). It names the
//! id type, the create/update DTOs, the custom actions, the injected context and the error type,
//! and provides the lifecycle hooks (`on_create`, `on_update`, `on_delete`, `handle_action`).
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.
//!
//! # Atomicity
//! `on_update` and `handle_action` run against a copy of the stored entity. The actor commits the
//! copy only when the hook returns `Ok`, so a hook may mutate freely before failing.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks may call other actors. The `Context` type is injected
/// into every hook when the actor is started with `run(context)`, not when it is constructed.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    ///
    /// Ids are minted from a `u32` counter, so `Ord` on the id is creation order. The store is
    /// ordered by it and listings come back oldest first.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message. Clients downcast it back out of
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// Validation of the payload belongs here; it runs before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
