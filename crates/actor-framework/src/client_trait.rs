//! # ActorClient Trait
//!
//! Common surface for resource-specific clients: default `get`, `fetch`, `delete` and `list_all`
//! built on top of a generic `ResourceClient`, with errors mapped into the resource's own type.
use crate::{ActorEntity, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read/delete operations.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Product> for CatalogClient {
///     type Error = CatalogError;
///     fn inner(&self) -> &ResourceClient<Product> { &self.inner }
///     fn map_error(e: FrameworkError) -> CatalogError { /* ... */ }
///     fn not_found(id: &ProductId) -> CatalogError { CatalogError::NotFound(id.to_string()) }
/// }
///
/// // get(), fetch(), delete() and list_all() now come for free.
/// let product = catalog.fetch(id).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// The error reported when `fetch` finds nothing.
    fn not_found(id: &T::Id) -> Self::Error;

    /// Fetch an entity by ID, `None` when absent.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch an entity by ID, failing when absent.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        match self.inner().get(id.clone()).await {
            Ok(Some(item)) => Ok(item),
            Ok(None) => Err(Self::not_found(&id)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Every entity, in creation order.
    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .list(Filter::all())
            .await
            .map_err(Self::map_error)
    }
}
