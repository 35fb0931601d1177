// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cart contents: ordered entries with at most one entry per product id.

use std::sync::Arc;

use crate::catalog::{Price, Product};

/// One line in the cart.
///
/// The product is shared with the catalog, never copied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartEntry {
    product: Arc<Product>,
    quantity: u32,
}

impl CartEntry {
    /// The product on this line.
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    /// Units on this line (always at least 1).
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `quantity × price`.
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Ordered cart entries, in first-add order.
///
/// Item count and subtotal are derived on every read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`. Returns the line's new quantity.
    ///
    /// A line's quantity saturates at `u32::MAX`; further adds leave it
    /// there.
    pub fn add(&mut self, product: &Arc<Product>) -> u32 {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.product.id == product.id)
        {
            entry.quantity = entry.quantity.saturating_add(1);
            return entry.quantity;
        }
        self.entries.push(CartEntry {
            product: Arc::clone(product),
            quantity: 1,
        });
        1
    }

    /// Remove every entry. Returns `true` if anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    /// Entries in first-add order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Units of `id` in the cart (0 if absent).
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.product.id.as_str() == id)
            .map_or(0, CartEntry::quantity)
    }

    /// Total units across all entries.
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Σ quantity × price.
    pub fn subtotal(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }
}
