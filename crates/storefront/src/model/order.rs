/// Represents a placed order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
///
/// Orders are snapshots: every line carries the product name and unit price as they were at
/// checkout, and nothing can change an order once it is stored.
use crate::model::money::{line_amount, total_of};
use crate::model::{LineError, PaymentMethod, PricedLine, ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> Result<Decimal, LineError> {
        line_amount(self.product_id, self.unit_price, self.quantity)
    }
}

impl From<PricedLine> for OrderLine {
    fn from(line: PricedLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    lines: Vec<OrderLine>,
    total: Decimal,
    payment_method: PaymentMethod,
    placed_at: DateTime<Utc>,
}

impl Order {
    /// Builds an order from snapshot lines. The total is always the sum of the lines.
    ///
    /// Fails with `AmountOverflow` when that sum cannot be represented.
    pub fn new(id: OrderId, params: OrderCreate) -> Result<Self, LineError> {
        let total = total_of(
            params
                .lines
                .iter()
                .map(|l| (l.product_id, l.unit_price, l.quantity)),
        )?;
        Ok(Self {
            id,
            user_id: params.user_id,
            lines: params.lines,
            total,
            payment_method: params.payment_method,
            placed_at: params.placed_at,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

/// Payload for recording a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub lines: Vec<OrderLine>,
    pub payment_method: PaymentMethod,
    pub placed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: u32, name: &str, unit_price: Decimal, quantity: u32) -> OrderLine {
        OrderLine {
            product_id: ProductId(id),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    fn create(lines: Vec<OrderLine>) -> OrderCreate {
        OrderCreate {
            user_id: "alice".into(),
            lines,
            payment_method: PaymentMethod::Card,
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn total_is_sum_of_snapshot_lines() {
        let order = Order::new(
            OrderId(1),
            create(vec![
                line(1, "Laptop", Decimal::new(99999, 2), 1),
                line(2, "Smartphone", Decimal::new(49999, 2), 2),
            ]),
        )
        .unwrap();
        assert_eq!(order.total(), Decimal::new(199997, 2));
        assert_eq!(order.lines()[1].line_total(), Ok(Decimal::new(99998, 2)));
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.id().to_string(), "order_1");
    }

    #[test]
    fn unrepresentable_total_is_rejected() {
        let err = Order::new(
            OrderId(1),
            create(vec![
                line(1, "Laptop", Decimal::new(99999, 2), 1),
                line(5, "Yacht", Decimal::MAX, 2),
            ]),
        )
        .unwrap_err();
        assert_eq!(err, LineError::AmountOverflow(ProductId(5)));
    }
}
