//! Entity trait implementation for the Order domain type.
//!
//! Orders are write-once. Update and action types are uninhabited, so no request can change a
//! stored order, and `on_delete` refuses removal to keep the order book complete.

use super::error::OrderError;
use crate::model::{Order, OrderCreate, OrderId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = OrderError;

    /// Creates a new Order from snapshot lines.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.lines.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        if let Some(line) = params.lines.iter().find(|l| l.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "line for {} has zero quantity",
                line.product_id
            )));
        }
        Ok(Self::new(id, params)?)
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(OrderError::ValidationError(format!(
            "{} cannot be deleted",
            self.id()
        )))
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
