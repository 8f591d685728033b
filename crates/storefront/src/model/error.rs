//! Errors raised by the plain cart and order values.
//!
//! The actor modules map these into their own error types; nothing here knows about actors.

use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// Merging would take the line past `u32::MAX` units.
    #[error("quantity of {0} is too large")]
    QuantityOverflow(ProductId),

    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),

    #[error("Product not in catalog: {0}")]
    UnknownProduct(ProductId),

    /// A line amount or running total left the range `Decimal` can represent.
    #[error("amount for {0} is too large")]
    AmountOverflow(ProductId),
}
