//! # Catalog Actor
//!
//! This module implements the catalog: the single owner of every sellable [`Product`].
//!
//! ## Overview
//!
//! The catalog is one [`ResourceActor`] task. Reads and writes are serialized through its
//! mailbox, so admins editing products and shoppers pricing carts never see a half-applied
//! change. Carts and orders never hold a `Product`; they keep ids (carts) or copied values
//! (orders).
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`CatalogError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use storefront::catalog_actor;
//! use storefront::clients::CatalogClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = catalog_actor::new(32);
//!     let catalog = CatalogClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = catalog.add("Widget", "A small widget", Decimal::new(2999, 2)).await?;
//!     let hits = catalog.search("widget").await?;
//!     assert_eq!(hits.iter().next().map(|p| p.id), Some(id));
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Product;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Catalog actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
