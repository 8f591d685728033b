//! # Actor Framework
//!
//! Building blocks for type-safe actor systems on Tokio, in the Resource-Oriented style: every
//! resource type gets a uniform Create / Get / List / Update / Delete / Action surface, served by
//! an actor that owns the resource's state outright.
//!
//! ## Layers
//!
//! 1. **Entity Layer** ([`ActorEntity`], [`SessionState`]) - domain types and their hooks
//! 2. **Runtime Layer** ([`ResourceActor`], [`SessionActor`]) - mailboxes and sequential processing
//! 3. **Interface Layer** ([`ResourceClient`], [`SessionClient`], [`ActorClient`]) - typed calls
//!
//! ## Two kinds of actor
//!
//! - [`ResourceActor<T>`] keeps a keyed collection of `T`. One actor, one mutual-exclusion domain:
//!   every read and write of the collection goes through its mailbox in order.
//! - [`SessionActor<S>`] keeps one value of `S` for one owner. Each session runs in its own task,
//!   so sessions never wait on each other.
//!
//! Both apply mutations to a copy and commit only on success, so a failed request never leaves
//! partial state behind.
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor is started (`run(context)`, or
//! `run_until(context, shutdown)` to also stop on a `watch` signal), not when it is built.
//! A cart session can therefore receive the catalog client that was created alongside it:
//!
//! ```rust,ignore
//! let (catalog_actor, catalog) = ResourceActor::<Product>::new(32);
//! tokio::spawn(catalog_actor.run(()));
//!
//! let (session, cart) = SessionActor::new("cart:alice", Cart::new(user), 16);
//! tokio::spawn(session.run(CartContext { catalog: catalog.clone(), .. }));
//! ```
//!
//! ## Notifications
//!
//! A `ResourceActor` publishes a [`ResourceEvent`] after each committed create, update and
//! delete. [`ResourceClient::subscribe`] hands out receivers.
//!
//! ## Testing
//!
//! See [`mock`] for `MockClient` and the step-by-step request helpers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod session;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceEvent, ResourceRequest, Response};
pub use session::{SessionActor, SessionClient, SessionRequest, SessionState};
