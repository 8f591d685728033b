//! # Cart Sessions
//!
//! Each shopper's cart is owned by its own [`SessionActor`] task. Commands for one cart are
//! handled one at a time, while different shoppers' carts proceed in parallel.
//!
//! ## Structure
//!
//! - [`entity`] - [`SessionState`](actor_framework::SessionState) implementation for [`Cart`],
//!   with [`CartCommand`], [`CartReply`] and the injected [`CartContext`]
//! - [`error`] - [`CartError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the session actor and its client
//!
//! ## Usage
//!
//! Sessions are normally obtained from
//! [`Storefront::session`](crate::lifecycle::Storefront::session), which wires the context and
//! returns the same cart for the same user. Wiring one by hand:
//!
//! ```rust,ignore
//! let (actor, cart) = cart_session::new("alice".into(), 16);
//! tokio::spawn(actor.run(CartContext { catalog, processor }));
//! cart.add_item(laptop_id, 1).await?;
//! ```

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

use crate::clients::CartClient;
use crate::model::{Cart, UserId};
use actor_framework::SessionActor;

/// Creates a new cart session actor for `user_id` and its client.
pub fn new(user_id: UserId, buffer_size: usize) -> (SessionActor<Cart>, CartClient) {
    let label = format!("cart:{user_id}");
    let (actor, session) = SessionActor::new(label, Cart::new(user_id.clone()), buffer_size);
    (actor, CartClient::new(user_id, session))
}
