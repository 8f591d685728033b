//! The cart value owned by a single shopping session.
//!
//! A [`Cart`] stores product ids and quantities only. Prices always come from the catalog at the
//! moment they are needed, through a [`PriceBook`] fetched by the caller, so a total is never
//! stale.
use crate::model::money::{line_amount, total_of};
use crate::model::{LineError, Product, ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One product in a cart and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Catalog entries for a set of products, looked up in one round trip.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    products: HashMap<ProductId, Product>,
}

impl PriceBook {
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for PriceBook {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self {
            products: iter.into_iter().map(|p| (p.id, p)).collect(),
        }
    }
}

/// A cart line priced at current catalog values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl PricedLine {
    pub fn line_total(&self) -> Result<Decimal, LineError> {
        line_amount(self.product_id, self.unit_price, self.quantity)
    }
}

fn priced_total(lines: &[PricedLine]) -> Result<Decimal, LineError> {
    total_of(
        lines
            .iter()
            .map(|l| (l.product_id, l.unit_price, l.quantity)),
    )
}

/// What a presentation layer shows for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartView {
    pub user_id: UserId,
    pub lines: Vec<PricedLine>,
    pub total: Decimal,
}

/// Lines in the order products were first added, at most one per product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    user_id: UserId,
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            lines: Vec::new(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.line(product_id).map(|line| line.quantity)
    }

    pub fn product_ids(&self) -> Vec<ProductId> {
        self.lines.iter().map(|line| line.product_id).collect()
    }

    fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product_id == product_id)
    }

    /// Rejects quantities that cannot be added to a cart.
    pub fn check_quantity(quantity: u32) -> Result<(), LineError> {
        if quantity == 0 {
            return Err(LineError::ZeroQuantity);
        }
        Ok(())
    }

    /// Adds `quantity` units, merging into the existing line for the product if there is one.
    ///
    /// The caller is responsible for checking that the product exists in the catalog.
    /// Returns the line's new quantity.
    pub fn add_item(&mut self, product_id: ProductId, quantity: u32) -> Result<u32, LineError> {
        Self::check_quantity(quantity)?;
        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or(LineError::QuantityOverflow(product_id))?;
                Ok(line.quantity)
            }
            None => {
                self.lines.push(CartLine {
                    product_id,
                    quantity,
                });
                Ok(quantity)
            }
        }
    }

    pub fn remove_item(&mut self, product_id: ProductId) -> Result<CartLine, LineError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.product_id == product_id)
            .ok_or(LineError::NotInCart(product_id))?;
        Ok(self.lines.remove(index))
    }

    /// Replaces a line's quantity. Zero removes the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<(), LineError> {
        if quantity == 0 {
            return self.remove_item(product_id).map(|_| ());
        }
        let line = self
            .line_mut(product_id)
            .ok_or(LineError::NotInCart(product_id))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Prices every line from `prices`. Fails on the first line whose product is gone.
    pub fn priced_lines(&self, prices: &PriceBook) -> Result<Vec<PricedLine>, LineError> {
        self.lines
            .iter()
            .map(|line| {
                let product = prices
                    .get(line.product_id)
                    .ok_or(LineError::UnknownProduct(line.product_id))?;
                Ok(PricedLine {
                    product_id: line.product_id,
                    name: product.name.clone(),
                    unit_price: product.price,
                    quantity: line.quantity,
                })
            })
            .collect()
    }

    /// Fails with `AmountOverflow` instead of panicking when the sum leaves `Decimal`'s range.
    pub fn total(&self, prices: &PriceBook) -> Result<Decimal, LineError> {
        priced_total(&self.priced_lines(prices)?)
    }

    pub fn view(&self, prices: &PriceBook) -> Result<CartView, LineError> {
        let lines = self.priced_lines(prices)?;
        let total = priced_total(&lines)?;
        Ok(CartView {
            user_id: self.user_id.clone(),
            lines,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_prices() -> PriceBook {
        [
            Product::new(ProductId(1), "Laptop", "", Decimal::new(99999, 2)),
            Product::new(ProductId(2), "Smartphone", "", Decimal::new(49999, 2)),
            Product::new(ProductId(3), "Headphones", "", Decimal::new(19999, 2)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn adding_same_product_merges_quantities() {
        let mut cart = Cart::new("alice");
        cart.add_item(ProductId(1), 2).unwrap();
        assert_eq!(cart.add_item(ProductId(1), 3).unwrap(), 5);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(ProductId(1)), Some(5));
    }

    #[test]
    fn total_uses_current_prices() {
        let mut cart = Cart::new("alice");
        cart.add_item(ProductId(1), 1).unwrap();
        cart.add_item(ProductId(2), 2).unwrap();
        assert_eq!(cart.total(&demo_prices()).unwrap(), Decimal::new(199997, 2));

        let cheaper: PriceBook = [
            Product::new(ProductId(1), "Laptop", "", Decimal::new(90000, 2)),
            Product::new(ProductId(2), "Smartphone", "", Decimal::new(49999, 2)),
        ]
        .into_iter()
        .collect();
        assert_eq!(cart.total(&cheaper).unwrap(), Decimal::new(189998, 2));
    }

    #[test]
    fn empty_cart_totals_zero() {
        assert_eq!(Cart::new("bob").total(&PriceBook::default()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn set_quantity_zero_removes_line() {
        let mut cart = Cart::new("alice");
        cart.add_item(ProductId(1), 1).unwrap();
        cart.add_item(ProductId(2), 2).unwrap();

        cart.set_quantity(ProductId(2), 0).unwrap();
        assert_eq!(cart.product_ids(), vec![ProductId(1)]);
        assert_eq!(cart.total(&demo_prices()).unwrap(), Decimal::new(99999, 2));

        cart.set_quantity(ProductId(1), 4).unwrap();
        assert_eq!(cart.quantity_of(ProductId(1)), Some(4));
    }

    #[test]
    fn missing_lines_are_not_in_cart() {
        let mut cart = Cart::new("alice");
        assert_eq!(
            cart.remove_item(ProductId(9)),
            Err(LineError::NotInCart(ProductId(9)))
        );
        assert_eq!(
            cart.set_quantity(ProductId(9), 2),
            Err(LineError::NotInCart(ProductId(9)))
        );
        assert_eq!(
            cart.set_quantity(ProductId(9), 0),
            Err(LineError::NotInCart(ProductId(9)))
        );
    }

    #[test]
    fn rejects_zero_and_overflowing_quantities() {
        let mut cart = Cart::new("alice");
        assert_eq!(cart.add_item(ProductId(1), 0), Err(LineError::ZeroQuantity));
        cart.add_item(ProductId(1), u32::MAX).unwrap();
        assert_eq!(
            cart.add_item(ProductId(1), 1),
            Err(LineError::QuantityOverflow(ProductId(1)))
        );
        assert_eq!(cart.quantity_of(ProductId(1)), Some(u32::MAX));
    }

    #[test]
    fn dangling_product_fails_total() {
        let mut cart = Cart::new("alice");
        cart.add_item(ProductId(1), 1).unwrap();
        cart.add_item(ProductId(42), 1).unwrap();
        assert_eq!(
            cart.total(&demo_prices()),
            Err(LineError::UnknownProduct(ProductId(42)))
        );
    }

    #[test]
    fn lines_keep_first_added_order() {
        let mut cart = Cart::new("alice");
        cart.add_item(ProductId(3), 1).unwrap();
        cart.add_item(ProductId(1), 1).unwrap();
        cart.add_item(ProductId(3), 1).unwrap();

        let view = cart.view(&demo_prices()).unwrap();
        let names: Vec<&str> = view.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Headphones", "Laptop"]);
        assert_eq!(view.total, Decimal::new(139997, 2));
    }

    #[test]
    fn total_out_of_range_is_an_error() {
        let prices: PriceBook = [
            Product::new(ProductId(1), "Laptop", "", Decimal::new(99999, 2)),
            Product::new(ProductId(5), "Yacht", "", Decimal::MAX),
        ]
        .into_iter()
        .collect();
        let mut cart = Cart::new("alice");
        cart.add_item(ProductId(1), 1).unwrap();
        cart.add_item(ProductId(5), 2).unwrap();

        assert_eq!(
            cart.total(&prices),
            Err(LineError::AmountOverflow(ProductId(5)))
        );
        assert_eq!(
            cart.view(&prices),
            Err(LineError::AmountOverflow(ProductId(5)))
        );
        assert_eq!(cart.quantity_of(ProductId(5)), Some(2));
    }
}
