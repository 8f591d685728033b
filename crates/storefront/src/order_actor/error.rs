//! Error types for the Order actor and checkout.

use crate::catalog_actor::CatalogError;
use crate::errors::ErrorKind;
use crate::model::{LineError, ProductId, UnknownPaymentMethod};
use thiserror::Error;

/// Errors that can occur during checkout and order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Checkout was attempted on a cart without lines.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// The order data provided is invalid, or no payment method was selected.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// A cart line references a product that has since left the catalog.
    #[error("Product no longer in catalog: {0}")]
    UnknownProduct(ProductId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) | OrderError::UnknownProduct(_) => ErrorKind::NotFound,
            OrderError::EmptyCart => ErrorKind::EmptyCart,
            OrderError::ValidationError(_) => ErrorKind::Validation,
            OrderError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<UnknownPaymentMethod> for OrderError {
    fn from(err: UnknownPaymentMethod) -> Self {
        OrderError::ValidationError(err.to_string())
    }
}

/// A line whose product has vanished keeps its identity; every other line problem, such as a
/// total too large to represent, is a validation error.
impl From<LineError> for OrderError {
    fn from(err: LineError) -> Self {
        match err {
            LineError::UnknownProduct(id) => OrderError::UnknownProduct(id),
            other => OrderError::ValidationError(other.to_string()),
        }
    }
}

/// Catalog failures seen while pricing a cart for checkout.
impl From<CatalogError> for OrderError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
            other => OrderError::ValidationError(other.to_string()),
        }
    }
}
