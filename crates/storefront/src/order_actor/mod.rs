//! # Order Actor
//!
//! This module keeps the order book and implements checkout.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`processor`] - [`OrderProcessor`] and the [`CheckoutState`] machine
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The order actor itself needs nothing (`Context = ()`): by the time an order reaches it, the
//! processor has already priced every line. The [`OrderProcessor`] is what depends on the
//! catalog, and it is injected into each cart session rather than into this actor.

pub mod entity;
pub mod error;
pub mod processor;

pub use error::*;
pub use processor::*;

use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
