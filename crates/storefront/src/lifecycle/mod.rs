//! # System Lifecycle & Orchestration
//!
//! This module manages the runtime lifecycle of the storefront: starting the actors, wiring them
//! together, handing out cart sessions and shutting everything down.
//!
//! ## The Orchestration Pattern
//!
//! Individual actors are simple; **wiring them together** is where the complexity lives.
//! [`Storefront`] is the conductor:
//!
//! 1. **Actor Creation** - the catalog and order actors, with their clients
//! 2. **Dependency Injection** - each cart session gets a [`CartContext`] holding the catalog
//!    client and the [`OrderProcessor`], passed to `run_until(context, shutdown)`
//! 3. **Session Registry** - one cart per user, created lazily
//! 4. **Graceful Shutdown** - a `watch` signal stops every task, then all tasks are awaited
//! 5. **Configuration** - [`StorefrontConfig`] sizes the mailboxes and controls demo seeding
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them when started:
//!
//! ```rust,ignore
//! // No dependencies
//! impl ActorEntity for Product {
//!     type Context = ();
//! }
//!
//! // Needs the catalog for lookups and the processor for checkout
//! impl SessionState for Cart {
//!     type Context = CartContext;
//! }
//! ```
//!
//! The dependency graph is acyclic: sessions depend on the catalog and the order book, and
//! nothing depends on sessions.
//!
//! ## Graceful Shutdown
//!
//! Dropping clients is not enough to stop a storefront, because a presentation layer may still
//! hold catalog or cart clients. [`Storefront::shutdown`] therefore flips a
//! `tokio::sync::watch` flag that every actor loop selects on, then awaits each task. Clients
//! used after that report an `Unavailable` error.
//!
//! [`CartContext`]: crate::cart_session::CartContext
//! [`OrderProcessor`]: crate::order_actor::OrderProcessor
//!
//! ## Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging, filtered by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```

pub mod config;
pub mod storefront;

pub use actor_framework::tracing::setup_tracing;
pub use config::*;
pub use storefront::*;
