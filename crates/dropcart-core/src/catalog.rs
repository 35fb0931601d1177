// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Read-only product catalog.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, ConfigService, ConfigStore};

/// Config key holding a JSON array of products.
pub const CATALOG_KEY: &str = "catalog";

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    /// A product has an empty id.
    #[error("product id must not be empty")]
    EmptyId,
    /// A product has an empty display name.
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
    /// A price was negative, NaN or infinite.
    #[error("invalid price: {0}")]
    InvalidPrice(f64),
    /// Loading the catalog fixture failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Opaque product identifier (the drag payload).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative amount in cents.
///
/// Serialized as a decimal number (`129.99`) and rounded to the nearest cent
/// on the way in, so sums over a cart stay exact.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(u64);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Build from whole cents.
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Whole cents.
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units.
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    /// Approximate value in currency units.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl TryFrom<f64> for Price {
    type Error = CatalogError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 {
            return Err(CatalogError::InvalidPrice(value));
        }
        Ok(Self((value * 100.0).round() as u64))
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.as_f64()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    /// Two-decimal display, no currency symbol.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// A purchasable item. Immutable once in a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Optional image reference; presentation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Product without an image.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            price,
            image: None,
        }
    }
}

/// Ordered, immutable product list with lookup by id.
///
/// Products are handed out as shared `Arc`s; looking the same id up twice
/// yields pointer-equal results.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting empty ids, empty names and duplicate ids.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let mut list = Vec::new();
        let mut index = HashMap::new();
        for product in products {
            if product.id.as_str().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
            if index.contains_key(&product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            index.insert(product.id.clone(), list.len());
            list.push(Arc::new(product));
        }
        Ok(Self {
            products: list,
            index,
        })
    }

    /// The demo's built-in six products.
    pub fn builtin() -> Self {
        let products = [
            ("1", "Pixel Headphones", 12999),
            ("2", "Retro Keyboard", 8999),
            ("3", "Wireless Mouse", 4999),
            ("4", "USB-C Hub", 3999),
            ("5", "Mechanical Switch", 1999),
            ("6", "LED Monitor Stand", 7999),
        ];
        let products: Vec<Arc<Product>> = products
            .into_iter()
            .map(|(id, name, cents)| Arc::new(Product::new(id, name, Price::from_cents(cents))))
            .collect();
        let index = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self { products, index }
    }

    /// Load the `catalog` key from config, falling back to [`Catalog::builtin`]
    /// when the key is missing.
    pub fn load_or_builtin<S: ConfigStore>(
        config: &ConfigService<S>,
    ) -> Result<Self, CatalogError> {
        match config.load::<Vec<Product>>(CATALOG_KEY)? {
            Some(products) => Self::new(products),
            None => Ok(Self::builtin()),
        }
    }

    /// Exact-match lookup.
    pub fn lookup(&self, id: &str) -> Option<Arc<Product>> {
        self.index.get(id).map(|&i| Arc::clone(&self.products[i]))
    }

    /// Products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_pointer_stable() {
        let catalog = Catalog::builtin();
        let a = catalog.lookup("1");
        let b = catalog.lookup("1");
        assert!(matches!((&a, &b), (Some(a), Some(b)) if Arc::ptr_eq(a, b)));
        assert_eq!(a.map(|p| p.name.clone()).as_deref(), Some("Pixel Headphones"));
    }

    #[test]
    fn test_lookup_misses() {
        let catalog = Catalog::builtin();
        assert!(catalog.lookup("999").is_none());
        assert!(catalog.lookup("").is_none());
        assert!(catalog.lookup(" 1").is_none());
    }

    #[test]
    fn test_builtin_order() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_rejects_duplicates_and_blanks() {
        let p = |id: &str, name: &str| Product::new(id, name, Price::from_cents(100));
        assert!(matches!(
            Catalog::new([p("a", "A"), p("a", "B")]),
            Err(CatalogError::DuplicateId(id)) if id.as_str() == "a"
        ));
        assert!(matches!(Catalog::new([p("", "A")]), Err(CatalogError::EmptyId)));
        assert!(matches!(Catalog::new([p("a", "  ")]), Err(CatalogError::EmptyName(_))));
    }

    #[test]
    fn test_price_display_and_parse() {
        assert_eq!(Price::from_cents(12999).to_string(), "129.99");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
        assert_eq!(Price::ZERO.to_string(), "0.00");
        assert!(matches!(Price::try_from(129.99), Ok(p) if p.cents() == 12999));
        assert!(Price::try_from(-0.01).is_err());
        assert!(Price::try_from(f64::NAN).is_err());
    }

    #[test]
    fn test_product_json_shape() {
        let json = r#"[{"id":"7","name":"Desk Lamp","price":24.5}]"#;
        let products: Vec<Product> = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, Price::from_cents(2450));
        assert!(products[0].image.is_none());
    }
}
