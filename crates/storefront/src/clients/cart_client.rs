//! # Cart Client
//!
//! Typed API over one cart session. Each method sends one [`CartCommand`] and unpacks the
//! matching [`CartReply`].
use crate::cart_session::{CartCommand, CartError, CartReply};
use crate::model::{Cart, CartLine, CartView, Order, PaymentMethod, ProductId, UserId};
use crate::order_actor::OrderError;
use actor_framework::{FrameworkError, SessionClient};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for one shopper's cart session.
#[derive(Clone)]
pub struct CartClient {
    user_id: UserId,
    inner: SessionClient<Cart>,
}

fn map_error(e: FrameworkError) -> CartError {
    match e.downcast_entity::<CartError>() {
        Ok(err) => err,
        Err(other) => CartError::ActorCommunicationError(other.to_string()),
    }
}

fn unexpected(reply: CartReply) -> CartError {
    CartError::ActorCommunicationError(format!("unexpected reply: {reply:?}"))
}

impl CartClient {
    pub fn new(user_id: UserId, inner: SessionClient<Cart>) -> Self {
        Self { user_id, inner }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// True once the session has ended.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    async fn send(&self, command: CartCommand) -> Result<CartReply, CartError> {
        debug!("Sending request");
        self.inner.send(command).await.map_err(map_error)
    }

    /// Add `quantity` units, merging with an existing line. Returns the line's new quantity.
    #[instrument(skip(self), fields(user = %self.user_id))]
    pub async fn add_item(&self, product_id: ProductId, quantity: u32) -> Result<u32, CartError> {
        match self
            .send(CartCommand::AddItem {
                product_id,
                quantity,
            })
            .await?
        {
            CartReply::Quantity(quantity) => Ok(quantity),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self), fields(user = %self.user_id))]
    pub async fn remove_item(&self, product_id: ProductId) -> Result<CartLine, CartError> {
        match self.send(CartCommand::RemoveItem(product_id)).await? {
            CartReply::Removed(line) => Ok(line),
            other => Err(unexpected(other)),
        }
    }

    /// Replace a line's quantity; zero removes the line.
    #[instrument(skip(self), fields(user = %self.user_id))]
    pub async fn set_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        match self
            .send(CartCommand::SetQuantity {
                product_id,
                quantity,
            })
            .await?
        {
            CartReply::Done => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self), fields(user = %self.user_id))]
    pub async fn clear(&self) -> Result<(), CartError> {
        match self.send(CartCommand::Clear).await? {
            CartReply::Done => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Sum of current catalog price times quantity over every line.
    #[instrument(skip(self), fields(user = %self.user_id))]
    pub async fn total(&self) -> Result<Decimal, CartError> {
        match self.send(CartCommand::Total).await? {
            CartReply::Total(total) => Ok(total),
            other => Err(unexpected(other)),
        }
    }

    pub async fn lines(&self) -> Result<Vec<CartLine>, CartError> {
        match self.send(CartCommand::Lines).await? {
            CartReply::Lines(lines) => Ok(lines),
            other => Err(unexpected(other)),
        }
    }

    pub async fn len(&self) -> Result<usize, CartError> {
        Ok(self.lines().await?.len())
    }

    pub async fn is_empty(&self) -> Result<bool, CartError> {
        Ok(self.lines().await?.is_empty())
    }

    /// Lines priced at current catalog values, with their total.
    #[instrument(skip(self), fields(user = %self.user_id))]
    pub async fn view(&self) -> Result<CartView, CartError> {
        match self.send(CartCommand::View).await? {
            CartReply::View(view) => Ok(view),
            other => Err(unexpected(other)),
        }
    }

    /// Place an order for the cart's contents and empty the cart.
    #[instrument(skip(self), fields(user = %self.user_id))]
    pub async fn checkout(&self, payment: Option<PaymentMethod>) -> Result<Order, OrderError> {
        match self.send(CartCommand::Checkout(payment)).await {
            Ok(CartReply::Order(order)) => Ok(order),
            Ok(other) => Err(OrderError::ActorCommunicationError(
                unexpected(other).to_string(),
            )),
            Err(CartError::Checkout(e)) => Err(e),
            Err(CartError::ActorCommunicationError(msg)) => {
                Err(OrderError::ActorCommunicationError(msg))
            }
            Err(other) => Err(OrderError::ValidationError(other.to_string())),
        }
    }

    /// Like [`checkout`](Self::checkout), with the payment method given as a selection token
    /// such as `"card"` or `"PayPal"`.
    pub async fn checkout_with_token(&self, token: &str) -> Result<Order, OrderError> {
        let method = token.parse::<PaymentMethod>()?;
        self.checkout(Some(method)).await
    }
}
