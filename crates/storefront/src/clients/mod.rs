//! Typed clients for the storefront actors.
//!
//! A presentation layer talks to the core only through these: [`CatalogClient`] for products,
//! [`CartClient`] for one shopper's cart, and [`OrderClient`] for the order book.

pub mod cart_client;
pub mod catalog_client;
pub mod order_client;

pub use cart_client::*;
pub use catalog_client::*;
pub use order_client::*;
