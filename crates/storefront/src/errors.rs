//! Error classification shared by every storefront component.
//!
//! Each component has its own error enum; [`ErrorKind`] lets a presentation layer react to a
//! failure (show a form error, a "gone" notice, retry later) without matching every variant.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Input rejected: blank name, negative price, zero quantity, missing payment method.
    Validation,
    /// A product, cart line or order does not exist.
    NotFound,
    /// Checkout attempted with nothing in the cart.
    EmptyCart,
    /// The actor behind a client has stopped.
    Unavailable,
}
