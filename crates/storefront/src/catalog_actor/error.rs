//! Error types for the Catalog actor.

use crate::errors::ErrorKind;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The product data provided is invalid.
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::ValidationError(_) => ErrorKind::Validation,
            CatalogError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<String> for CatalogError {
    fn from(msg: String) -> Self {
        CatalogError::ActorCommunicationError(msg)
    }
}
