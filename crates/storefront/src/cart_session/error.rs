//! Error types for cart sessions.

use crate::catalog_actor::CatalogError;
use crate::errors::ErrorKind;
use crate::model::{LineError, ProductId};
use crate::order_actor::OrderError;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The quantity provided is invalid (zero, or too large to merge).
    #[error("Cart validation error: {0}")]
    ValidationError(String),

    /// The product is not in the catalog.
    #[error("Product not in catalog: {0}")]
    UnknownProduct(ProductId),

    /// The cart has no line for the product.
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),

    /// Checking out the cart failed.
    #[error(transparent)]
    Checkout(#[from] OrderError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::ValidationError(_) => ErrorKind::Validation,
            CartError::UnknownProduct(_) | CartError::NotInCart(_) => ErrorKind::NotFound,
            CartError::Checkout(e) => e.kind(),
            CartError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }

    /// Maps a catalog failure seen while looking up `product_id`.
    pub fn from_catalog(product_id: ProductId, err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => CartError::UnknownProduct(product_id),
            CatalogError::ValidationError(msg) => CartError::ValidationError(msg),
            CatalogError::ActorCommunicationError(msg) => CartError::ActorCommunicationError(msg),
        }
    }
}

impl From<LineError> for CartError {
    fn from(err: LineError) -> Self {
        match err {
            LineError::NotInCart(id) => CartError::NotInCart(id),
            LineError::UnknownProduct(id) => CartError::UnknownProduct(id),
            other => CartError::ValidationError(other.to_string()),
        }
    }
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}

/// Catalog failures not tied to a single product, such as pricing the whole cart.
impl From<CatalogError> for CartError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ActorCommunicationError(msg) => CartError::ActorCommunicationError(msg),
            other => CartError::ValidationError(other.to_string()),
        }
    }
}
