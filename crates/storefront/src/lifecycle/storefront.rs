use super::config::{ConfigError, StorefrontConfig};
use crate::cart_session::{self, CartContext};
use crate::catalog_actor::{self, CatalogError};
use crate::clients::{CartClient, CatalogClient, OrderClient};
use crate::model::UserId;
use crate::order_actor::{self, OrderProcessor};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Errors from starting or stopping a [`Storefront`].
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Catalog seeding failed: {0}")]
    Seed(#[from] CatalogError),

    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The runtime orchestrator for the storefront.
///
/// `Storefront` is responsible for:
/// - **Lifecycle Management**: Starting the catalog and order actors, and stopping everything
/// - **Dependency Wiring**: Injecting the catalog and the order processor into every cart session
/// - **Session Registry**: One cart per user, created on first use
///
/// # Architecture
///
/// - **Catalog Actor**: owns every product (`ResourceActor<Product>`)
/// - **Order Actor**: the order book (`ResourceActor<Order>`)
/// - **Cart Sessions**: one `SessionActor<Cart>` per shopper
///
/// # Example
///
/// ```ignore
/// let store = Storefront::start(StorefrontConfig::default()).await?;
/// let laptop = store.catalog().add("Laptop", "", Decimal::new(99999, 2)).await?;
///
/// let cart = store.session("alice");
/// cart.add_item(laptop, 1).await?;
/// let order = cart.checkout(Some(PaymentMethod::Card)).await?;
///
/// store.shutdown().await?;
/// ```
pub struct Storefront {
    catalog: CatalogClient,
    orders: OrderClient,
    processor: OrderProcessor,
    config: StorefrontConfig,
    sessions: Mutex<HashMap<UserId, CartClient>>,
    /// Session tasks that may still be running. Finished ones are pruned on every insert.
    session_handles: Mutex<Vec<JoinHandle<()>>>,
    shutdown: watch::Sender<bool>,
    /// Catalog and order actor tasks.
    handles: Vec<JoinHandle<()>>,
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new()
    }
}

impl Storefront {
    /// Starts the actors with the default configuration. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(StorefrontConfig::default())
    }

    /// Starts the actors with `config`. Seeding is not done here; see [`start`](Self::start).
    pub fn with_config(config: StorefrontConfig) -> Self {
        let (shutdown, _) = watch::channel(false);

        // 1. Create actors (no dependencies)
        let (catalog_actor, catalog) = catalog_actor::new(config.catalog_buffer.max(1));
        let (order_actor, orders) = order_actor::new(config.order_buffer.max(1));

        // 2. Start them; both stop when the shutdown signal fires
        let catalog_handle = tokio::spawn(catalog_actor.run_until((), shutdown.subscribe()));
        let order_handle = tokio::spawn(order_actor.run_until((), shutdown.subscribe()));

        let catalog = CatalogClient::new(catalog);
        let orders = OrderClient::new(orders);
        let processor = OrderProcessor::new(catalog.clone(), orders.clone());

        info!(?config, "Storefront started");
        Self {
            catalog,
            orders,
            processor,
            config,
            sessions: Mutex::new(HashMap::new()),
            session_handles: Mutex::new(Vec::new()),
            shutdown,
            handles: vec![catalog_handle, order_handle],
        }
    }

    /// Validates `config`, starts the actors and seeds the catalog if asked to.
    pub async fn start(config: StorefrontConfig) -> Result<Self, LifecycleError> {
        config.validate()?;
        let storefront = Self::with_config(config);
        if storefront.config.seed_catalog {
            storefront.catalog.seed_defaults().await?;
        }
        Ok(storefront)
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    pub fn orders(&self) -> &OrderClient {
        &self.orders
    }

    pub fn processor(&self) -> &OrderProcessor {
        &self.processor
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The cart session for `user_id`, started on first use.
    ///
    /// Repeated calls for the same user return clients for the same cart.
    pub fn session(&self, user_id: impl Into<UserId>) -> CartClient {
        let user_id = user_id.into();
        let mut sessions = lock(&self.sessions);
        if let Some(cart) = sessions.get(&user_id) {
            if !cart.is_closed() {
                return cart.clone();
            }
        }

        let (actor, cart) = cart_session::new(user_id.clone(), self.config.session_buffer.max(1));
        let context = CartContext {
            catalog: self.catalog.clone(),
            processor: self.processor.clone(),
        };
        let handle = tokio::spawn(actor.run_until(context, self.shutdown.subscribe()));
        let mut handles = lock(&self.session_handles);
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
        drop(handles);

        info!(user = %user_id, "Cart session opened");
        sessions.insert(user_id, cart.clone());
        cart
    }

    /// Forgets the session for `user_id`. The cart actor stops once the caller's clients are
    /// dropped; a later [`session`](Self::session) call starts an empty cart.
    pub fn end_session(&self, user_id: &UserId) -> bool {
        let removed = lock(&self.sessions).remove(user_id).is_some();
        if removed {
            info!(user = %user_id, "Cart session ended");
        }
        removed
    }

    pub fn active_sessions(&self) -> usize {
        lock(&self.sessions)
            .values()
            .filter(|cart| !cart.is_closed())
            .count()
    }

    /// Cart session tasks still running, including sessions ended while a caller holds a client.
    pub fn running_sessions(&self) -> usize {
        let mut handles = lock(&self.session_handles);
        handles.retain(|h| !h.is_finished());
        handles.len()
    }

    /// Gracefully shuts down every actor.
    ///
    /// 1. Signals shutdown, which stops sessions and actors even while callers hold clients
    /// 2. Drops the registry and the clients owned here
    /// 3. Waits for all tasks, sessions first
    ///
    /// Every task is awaited even when one has failed; the first failure is returned.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down storefront...");
        self.shutdown.send_replace(true);

        let session_handles = std::mem::take(&mut *lock(&self.session_handles));
        drop(self.sessions);
        drop(self.processor);
        drop(self.catalog);
        drop(self.orders);

        let mut first_failure = None;
        for handle in session_handles.into_iter().chain(self.handles) {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                first_failure.get_or_insert(LifecycleError::TaskFailed(e.to_string()));
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => {
                info!("Storefront shutdown complete.");
                Ok(())
            }
        }
    }
}
