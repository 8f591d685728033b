//! # Framework Errors
//!
//! Errors raised by the runtime itself, shared by every actor and client.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type from an `EntityError`.
    ///
    /// Returns `Err(self)` unchanged when this is a runtime error, or when the boxed error is of a
    /// different type.
    pub fn downcast_entity<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(err) => Ok(*err),
                Err(inner) => Err(FrameworkError::EntityError(inner)),
            },
            other => Err(other),
        }
    }

    /// True when the actor behind the client is gone.
    pub fn is_disconnected(&self) -> bool {
        matches!(self, FrameworkError::ActorClosed | FrameworkError::ActorDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("price must not be negative")]
    struct NegativePrice;

    #[test]
    fn downcast_recovers_entity_error() {
        let err = FrameworkError::EntityError(Box::new(NegativePrice));
        assert_eq!(err.downcast_entity::<NegativePrice>().unwrap(), NegativePrice);
    }

    #[test]
    fn downcast_leaves_runtime_errors_alone() {
        let err = FrameworkError::NotFound("product_9".into());
        match err.downcast_entity::<NegativePrice>() {
            Err(FrameworkError::NotFound(id)) => assert_eq!(id, "product_9"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(FrameworkError::ActorClosed.is_disconnected());
    }
}
