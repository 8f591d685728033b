//! # Catalog Client
//!
//! Provides a high-level API for interacting with the catalog actor.
//! It wraps a `ResourceClient<Product>` and exposes the admin and shopper operations.
use crate::catalog_actor::CatalogError;
use crate::model::{PriceBook, Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient, ResourceEvent};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

/// Products loaded by [`CatalogClient::seed_defaults`].
const DEFAULT_PRODUCTS: [(&str, &str, i64); 3] = [
    ("Laptop", "A high performance laptop", 99999),
    ("Smartphone", "Latest Android smartphone", 49999),
    ("Headphones", "Noise-cancelling headphones", 19999),
];

/// Client for interacting with the Catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<CatalogError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => CatalogError::NotFound(id),
            Err(other) => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }

    fn not_found(id: &ProductId) -> Self::Error {
        CatalogError::NotFound(id.to_string())
    }
}

impl CatalogClient {
    /// Add a product and return its new id.
    #[instrument(skip(self, description))]
    pub async fn add(
        &self,
        name: &str,
        description: &str,
        price: Decimal,
    ) -> Result<ProductId, CatalogError> {
        self.create_product(ProductCreate::new(name, description, price))
            .await
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Apply every present field of `update`, or none of them.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, CatalogError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Remove a product. Carts that still reference it keep the id.
    pub async fn remove(&self, id: ProductId) -> Result<(), CatalogError> {
        self.delete(id).await
    }

    /// The product with `id`, or `NotFound`.
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.fetch(id).await
    }

    /// Products whose name contains `query`, ignoring case, in the order they were added.
    ///
    /// An empty query matches the whole catalog.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<SearchResults, CatalogError> {
        debug!("Sending request");
        let needle = query.to_lowercase();
        let filter = {
            let needle = needle.clone();
            Filter::new(move |p: &Product| p.name_contains(&needle))
        };
        let products = self.inner.list(filter).await.map_err(Self::map_error)?;
        debug!(matched = products.len(), "Search complete");
        Ok(SearchResults {
            query: needle,
            products,
        })
    }

    /// The whole catalog.
    pub async fn list(&self) -> Result<SearchResults, CatalogError> {
        self.search("").await
    }

    /// Current catalog entries for `ids`, fetched in one request. Ids missing from the catalog
    /// are simply absent from the result.
    #[instrument(skip(self))]
    pub async fn price_book(&self, ids: Vec<ProductId>) -> Result<PriceBook, CatalogError> {
        debug!("Sending request");
        if ids.is_empty() {
            return Ok(PriceBook::default());
        }
        let wanted: HashSet<ProductId> = ids.into_iter().collect();
        let products = self
            .inner
            .list(Filter::new(move |p: &Product| wanted.contains(&p.id)))
            .await
            .map_err(Self::map_error)?;
        Ok(products.into_iter().collect())
    }

    /// Receive `Created`/`Updated`/`Deleted` notifications after each committed change.
    ///
    /// `None` for clients that are not backed by a running actor.
    pub fn subscribe(&self) -> Option<broadcast::Receiver<ResourceEvent<ProductId>>> {
        self.inner.subscribe()
    }

    /// Load the demo products. Returns their ids in insertion order.
    #[instrument(skip(self))]
    pub async fn seed_defaults(&self) -> Result<Vec<ProductId>, CatalogError> {
        let mut ids = Vec::with_capacity(DEFAULT_PRODUCTS.len());
        for (name, description, cents) in DEFAULT_PRODUCTS {
            ids.push(self.add(name, description, Decimal::new(cents, 2)).await?);
        }
        info!(count = ids.len(), "Seeded catalog");
        Ok(ids)
    }
}

/// Snapshot of a catalog query.
///
/// Iterating borrows the snapshot, so the same results can be walked any number of times and
/// always in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    query: String,
    products: Vec<Product>,
}

impl SearchResults {
    /// The normalized (lowercased) query that produced these results.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn into_vec(self) -> Vec<Product> {
        self.products
    }
}

impl IntoIterator for SearchResults {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.into_iter()
    }
}

impl<'a> IntoIterator for &'a SearchResults {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
