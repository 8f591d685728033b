//! # Storefront Core
//!
//! The transactional core of a small storefront, built on the actor framework.
//!
//! - **[catalog_actor]**: the product catalog, one
//!   [`ResourceActor`](actor_framework::ResourceActor)
//! - **[cart_session]**: one cart per shopper, each its own
//!   [`SessionActor`](actor_framework::SessionActor)
//! - **[order_actor]**: the order book and the [`OrderProcessor`](order_actor::OrderProcessor)
//!   that turns a cart into an immutable order
//! - **[model]**: plain data ([`Product`](model::Product), [`Cart`](model::Cart),
//!   [`Order`](model::Order), [`PaymentMethod`](model::PaymentMethod))
//! - **[clients]**: typed async APIs a presentation layer calls
//! - **[lifecycle]**: the [`Storefront`](lifecycle::Storefront) orchestrator and its config
//!
//! Data flows one way: catalog, then cart, then checkout, then order.

pub mod cart_session;
pub mod catalog_actor;
pub mod clients;
pub mod errors;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
