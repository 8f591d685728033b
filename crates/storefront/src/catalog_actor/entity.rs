//! Entity trait implementation for the Product domain type.
//!
//! Validation lives here: a product always has a non-blank name and a non-negative price, both
//! when it is added and after any update.

use super::error::CatalogError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::convert::Infallible;

fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::ValidationError(
            "name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), CatalogError> {
    if price < Decimal::ZERO {
        return Err(CatalogError::ValidationError(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    // Products have no operations beyond CRUD.
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = CatalogError;

    /// Creates a new Product from creation parameters.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        validate_name(&params.name)?;
        validate_price(params.price)?;
        Ok(Self::new(id, params.name, params.description, params.price))
    }

    /// Handles updates to the Product entity.
    ///
    /// # Fields Updated
    /// - `name`: must stay non-blank
    /// - `description`: any text
    /// - `price`: must stay non-negative
    ///
    /// Fields are assigned as they are checked; a rejected field discards the whole update
    /// because the actor only commits on `Ok`.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            validate_name(&name)?;
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> Product {
        Product::new(ProductId(1), "Laptop", "14 inch", Decimal::new(99999, 2))
    }

    #[test]
    fn create_rejects_blank_name_and_negative_price() {
        let blank = ProductCreate::new("   ", "", Decimal::ONE);
        assert!(matches!(
            Product::from_create_params(ProductId(1), blank),
            Err(CatalogError::ValidationError(_))
        ));

        let negative = ProductCreate::new("Laptop", "", Decimal::new(-1, 2));
        assert!(matches!(
            Product::from_create_params(ProductId(1), negative),
            Err(CatalogError::ValidationError(_))
        ));

        let free = ProductCreate::new("Sticker", "", Decimal::ZERO);
        assert!(Product::from_create_params(ProductId(1), free).is_ok());
    }

    #[tokio::test]
    async fn update_applies_present_fields_only() {
        let mut product = laptop();
        let update = ProductUpdate::default().price(Decimal::new(89999, 2));
        product.on_update(update, &()).await.unwrap();

        assert_eq!(product.name, "Laptop");
        assert_eq!(product.description, "14 inch");
        assert_eq!(product.price, Decimal::new(89999, 2));
    }

    #[tokio::test]
    async fn update_rejects_invalid_fields() {
        let mut product = laptop();
        let update = ProductUpdate::default().name("");
        assert!(product.on_update(update, &()).await.is_err());

        let update = ProductUpdate::default().price(Decimal::NEGATIVE_ONE);
        assert!(product.on_update(update, &()).await.is_err());
    }
}
