//! # Order Client
//!
//! Provides a high-level API for interacting with the `Order` actor: recording placed orders and
//! reading the order book back.
use crate::model::{Order, OrderCreate, OrderId, UserId};
use crate::order_actor::OrderError;
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
///
/// Checkout itself lives in [`OrderProcessor`](crate::order_actor::OrderProcessor); this client
/// only stores and reads orders.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Record an order and return it as stored.
    ///
    /// Orders are immutable, so the stored value is rebuilt from the assigned id and `params`
    /// instead of being read back. Once the create succeeds, the order is never reported as
    /// failed.
    #[instrument(skip(self, params), fields(user = %params.user_id, lines = params.lines.len()))]
    pub async fn place(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        let id = self
            .inner
            .create(params.clone())
            .await
            .map_err(Self::map_error)?;
        Ok(Order::new(id, params)?)
    }

    /// The order with `id`, or `NotFound`.
    pub async fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.fetch(id).await
    }

    /// Every order placed by `user`, oldest first.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user: &UserId) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let user = user.clone();
        self.inner
            .list(Filter::new(move |o: &Order| o.user_id() == &user))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }

    fn not_found(id: &OrderId) -> Self::Error {
        OrderError::NotFound(id.to_string())
    }
}
