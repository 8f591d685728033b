//! Session state implementation for the Cart domain type.
//!
//! A cart session owns one [`Cart`]. Every command runs against a copy; the session actor keeps
//! the copy only if the command succeeds, so a rejected `AddItem` or a failed checkout leaves the
//! cart exactly as it was.

use super::error::CartError;
use crate::clients::CatalogClient;
use crate::model::{Cart, CartLine, CartView, Order, PaymentMethod, PriceBook, ProductId};
use crate::order_actor::OrderProcessor;
use actor_framework::SessionState;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Dependencies every cart session is started with.
#[derive(Clone)]
pub struct CartContext {
    /// Lookup only; the cart never owns products.
    pub catalog: CatalogClient,
    pub processor: OrderProcessor,
}

/// Commands understood by a cart session.
#[derive(Debug, Clone)]
pub enum CartCommand {
    AddItem {
        product_id: ProductId,
        quantity: u32,
    },
    RemoveItem(ProductId),
    SetQuantity {
        product_id: ProductId,
        quantity: u32,
    },
    Clear,
    Total,
    Lines,
    View,
    Checkout(Option<PaymentMethod>),
}

/// Replies to [`CartCommand`]s, one variant per kind of answer.
#[derive(Debug, Clone)]
pub enum CartReply {
    /// New quantity of the line that was added to.
    Quantity(u32),
    Removed(CartLine),
    Done,
    Total(Decimal),
    Lines(Vec<CartLine>),
    View(CartView),
    Order(Order),
}

impl Cart {
    async fn price_book(&self, catalog: &CatalogClient) -> Result<PriceBook, CartError> {
        Ok(catalog.price_book(self.product_ids()).await?)
    }
}

#[async_trait]
impl SessionState for Cart {
    type Command = CartCommand;
    type Reply = CartReply;
    type Context = CartContext;
    type Error = CartError;

    async fn handle(
        &mut self,
        command: CartCommand,
        ctx: &CartContext,
    ) -> Result<CartReply, CartError> {
        match command {
            CartCommand::AddItem {
                product_id,
                quantity,
            } => {
                Cart::check_quantity(quantity)?;
                ctx.catalog
                    .product(product_id)
                    .await
                    .map_err(|e| CartError::from_catalog(product_id, e))?;
                Ok(CartReply::Quantity(self.add_item(product_id, quantity)?))
            }
            CartCommand::RemoveItem(product_id) => {
                Ok(CartReply::Removed(self.remove_item(product_id)?))
            }
            CartCommand::SetQuantity {
                product_id,
                quantity,
            } => {
                self.set_quantity(product_id, quantity)?;
                Ok(CartReply::Done)
            }
            CartCommand::Clear => {
                self.clear();
                Ok(CartReply::Done)
            }
            CartCommand::Total => {
                let prices = self.price_book(&ctx.catalog).await?;
                Ok(CartReply::Total(self.total(&prices)?))
            }
            CartCommand::Lines => Ok(CartReply::Lines(self.lines().to_vec())),
            CartCommand::View => {
                let prices = self.price_book(&ctx.catalog).await?;
                Ok(CartReply::View(self.view(&prices)?))
            }
            CartCommand::Checkout(payment) => {
                let order = ctx.processor.checkout(self, payment).await?;
                Ok(CartReply::Order(order))
            }
        }
    }
}
