//! # Checkout
//!
//! [`OrderProcessor`] turns a cart and a payment selection into an [`Order`]. Every attempt walks
//! the [`CheckoutState`] machine:
//!
//! ```text
//! Pending ──select payment──▶ PaymentSelected ──order recorded──▶ Completed
//!    │                              │
//!    └──────────────▶ Failed ◀──────┘
//! ```
//!
//! The order is a snapshot: names and unit prices are copied from the catalog at checkout and
//! the total is computed from those copies, so later catalog edits never reach a placed order.

use super::error::OrderError;
use crate::clients::{CatalogClient, OrderClient};
use crate::errors::ErrorKind;
use crate::model::money::total_of;
use crate::model::{Cart, Order, OrderCreate, OrderId, OrderLine, PaymentMethod};
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

/// Where a checkout attempt stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    Pending,
    PaymentSelected(PaymentMethod),
    Completed(OrderId),
    Failed(ErrorKind),
}

impl CheckoutState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Completed(_) | CheckoutState::Failed(_))
    }

    pub fn select_payment(self, method: PaymentMethod) -> Result<Self, OrderError> {
        match self {
            CheckoutState::Pending => Ok(CheckoutState::PaymentSelected(method)),
            other => Err(invalid_transition(&other, "select a payment method")),
        }
    }

    pub fn complete(self, order: OrderId) -> Result<Self, OrderError> {
        match self {
            CheckoutState::PaymentSelected(_) => Ok(CheckoutState::Completed(order)),
            other => Err(invalid_transition(&other, "complete")),
        }
    }

    /// Moves a live attempt to `Failed`. Terminal states are returned unchanged.
    pub fn fail(self, kind: ErrorKind) -> Self {
        if self.is_terminal() {
            self
        } else {
            CheckoutState::Failed(kind)
        }
    }
}

fn invalid_transition(state: &CheckoutState, step: &str) -> OrderError {
    OrderError::ValidationError(format!("cannot {step} from {state:?}"))
}

/// Places orders. Holds the catalog for pricing and the order book for recording.
#[derive(Clone)]
pub struct OrderProcessor {
    catalog: CatalogClient,
    orders: OrderClient,
}

impl OrderProcessor {
    pub fn new(catalog: CatalogClient, orders: OrderClient) -> Self {
        Self { catalog, orders }
    }

    pub fn orders(&self) -> &OrderClient {
        &self.orders
    }

    /// Check out `cart` with the selected payment method.
    ///
    /// Fails with `EmptyCart` before anything else, then with a validation error when no
    /// payment method is selected. On success the cart is cleared; on failure it is untouched.
    #[instrument(skip(self, cart), fields(user = %cart.user_id(), lines = cart.len()))]
    pub async fn checkout(
        &self,
        cart: &mut Cart,
        payment: Option<PaymentMethod>,
    ) -> Result<Order, OrderError> {
        let mut state = CheckoutState::Pending;
        match self.run(cart, payment, &mut state).await {
            Ok(order) => {
                info!(order = %order.id(), total = %order.total(), "Checkout completed");
                Ok(order)
            }
            Err(e) => {
                let state = state.fail(e.kind());
                warn!(?state, error = %e, "Checkout failed");
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        cart: &mut Cart,
        payment: Option<PaymentMethod>,
        state: &mut CheckoutState,
    ) -> Result<Order, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let method = payment.ok_or_else(|| {
            OrderError::ValidationError("no payment method selected".to_string())
        })?;
        *state = state.clone().select_payment(method)?;
        debug!(?state, "Payment selected");

        let prices = self.catalog.price_book(cart.product_ids()).await?;
        let lines: Vec<OrderLine> = cart
            .priced_lines(&prices)?
            .into_iter()
            .map(OrderLine::from)
            .collect();
        // An unrepresentable total never reaches the order book
        total_of(
            lines
                .iter()
                .map(|l| (l.product_id, l.unit_price, l.quantity)),
        )?;

        let order = self
            .orders
            .place(OrderCreate {
                user_id: cart.user_id().clone(),
                lines,
                payment_method: method,
                placed_at: Utc::now(),
            })
            .await?;

        *state = state.clone().complete(order.id())?;
        cart.clear();
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductId};
    use actor_framework::mock::MockClient;
    use rust_decimal::Decimal;

    fn processor(catalog: &MockClient<Product>, orders: &MockClient<Order>) -> OrderProcessor {
        OrderProcessor::new(
            CatalogClient::new(catalog.client()),
            OrderClient::new(orders.client()),
        )
    }

    #[test]
    fn state_machine_follows_the_happy_path() {
        let state = CheckoutState::Pending
            .select_payment(PaymentMethod::PayPal)
            .unwrap();
        assert_eq!(state, CheckoutState::PaymentSelected(PaymentMethod::PayPal));
        assert!(!state.is_terminal());

        let state = state.complete(OrderId(1)).unwrap();
        assert_eq!(state, CheckoutState::Completed(OrderId(1)));
        assert!(state.is_terminal());
    }

    #[test]
    fn state_machine_rejects_skipped_and_repeated_steps() {
        assert!(CheckoutState::Pending.complete(OrderId(1)).is_err());
        assert!(CheckoutState::Completed(OrderId(1))
            .select_payment(PaymentMethod::Card)
            .is_err());
        assert_eq!(
            CheckoutState::Completed(OrderId(1)).fail(ErrorKind::Validation),
            CheckoutState::Completed(OrderId(1))
        );
        assert_eq!(
            CheckoutState::PaymentSelected(PaymentMethod::Card).fail(ErrorKind::NotFound),
            CheckoutState::Failed(ErrorKind::NotFound)
        );
    }

    #[tokio::test]
    async fn empty_cart_fails_before_payment_is_checked() {
        let catalog = MockClient::<Product>::new();
        let orders = MockClient::<Order>::new();
        let processor = processor(&catalog, &orders);

        let mut cart = Cart::new("alice");
        let err = processor.checkout(&mut cart, None).await.unwrap_err();
        assert_eq!(err, OrderError::EmptyCart);
        assert!(cart.is_empty());

        catalog.verify();
        orders.verify();
    }

    #[tokio::test]
    async fn missing_payment_is_a_validation_error() {
        let catalog = MockClient::<Product>::new();
        let orders = MockClient::<Order>::new();
        let processor = processor(&catalog, &orders);

        let mut cart = Cart::new("alice");
        cart.add_item(ProductId(1), 1).unwrap();
        let before = cart.clone();

        let err = processor.checkout(&mut cart, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(cart, before);
    }

    #[tokio::test]
    async fn vanished_product_fails_and_keeps_cart() {
        let mut catalog = MockClient::<Product>::new();
        catalog.expect_list().return_ok(vec![Product::new(
            ProductId(1),
            "Laptop",
            "",
            Decimal::new(99999, 2),
        )]);
        let orders = MockClient::<Order>::new();
        let processor = processor(&catalog, &orders);

        let mut cart = Cart::new("alice");
        cart.add_item(ProductId(1), 1).unwrap();
        cart.add_item(ProductId(2), 1).unwrap();
        let before = cart.clone();

        let err = processor
            .checkout(&mut cart, Some(PaymentMethod::Card))
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::UnknownProduct(ProductId(2)));
        assert_eq!(cart, before);
        catalog.verify();
        orders.verify();
    }

    #[tokio::test]
    async fn unrepresentable_total_fails_before_recording() {
        let mut catalog = MockClient::<Product>::new();
        catalog.expect_list().return_ok(vec![Product::new(
            ProductId(1),
            "Yacht",
            "",
            Decimal::MAX,
        )]);
        let orders = MockClient::<Order>::new();
        let processor = processor(&catalog, &orders);

        let mut cart = Cart::new("alice");
        cart.add_item(ProductId(1), 2).unwrap();
        let before = cart.clone();

        let err = processor
            .checkout(&mut cart, Some(PaymentMethod::Card))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(cart, before);
        catalog.verify();
        orders.verify();
    }
}
