//! Checked money arithmetic.
//!
//! `Decimal`'s operators panic when a result leaves its range. Prices are only bounded below, so
//! every amount derived from a price goes through these helpers instead.

use crate::model::{LineError, ProductId};
use rust_decimal::Decimal;

/// `unit_price × quantity`, or `AmountOverflow` for `product_id`.
pub fn line_amount(
    product_id: ProductId,
    unit_price: Decimal,
    quantity: u32,
) -> Result<Decimal, LineError> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(LineError::AmountOverflow(product_id))
}

/// Sums `(product, unit price, quantity)` triples, failing on the first line that overflows.
pub fn total_of<I>(lines: I) -> Result<Decimal, LineError>
where
    I: IntoIterator<Item = (ProductId, Decimal, u32)>,
{
    lines
        .into_iter()
        .try_fold(Decimal::ZERO, |total, (product_id, unit_price, quantity)| {
            let amount = line_amount(product_id, unit_price, quantity)?;
            total
                .checked_add(amount)
                .ok_or(LineError::AmountOverflow(product_id))
        })
}
