/// Represents a sellable product in the catalog.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`](crate::model::ProductCreate))
/// - Update parameters ([`ProductUpdate`](crate::model::ProductUpdate))
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Products.
///
/// Minted by the catalog actor from a counter starting at 1, so ordering ids orders products
/// by the time they were added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (set by the catalog actor)
    /// * `name` - Display name, searched by the catalog
    /// * `description` - Free text, may be empty
    /// * `price` - Unit price
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Case-insensitive substring match on the name. `needle` must already be lowercase.
    pub fn name_contains(&self, needle: &str) -> bool {
        needle.is_empty() || self.name.to_lowercase().contains(needle)
    }
}

/// DTO for Product creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

/// DTO for Product updates. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

impl ProductUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_match_ignores_case() {
        let phone = Product::new(ProductId(2), "SmartPhone", "", Decimal::new(49999, 2));
        assert!(phone.name_contains("phone"));
        assert!(phone.name_contains(""));
        assert!(!phone.name_contains("laptop"));
    }

    #[test]
    fn id_display_and_order() {
        assert_eq!(ProductId(7).to_string(), "product_7");
        assert!(ProductId(2) < ProductId(10));
    }
}
