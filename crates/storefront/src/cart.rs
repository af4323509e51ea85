//! Shopping cart.
//!
//! Holds the catalog items picked before checkout. The cart is not persisted.

use model_store_core::{ItemId, Price};

use crate::catalog::CatalogItem;
use crate::models::LineItem;

/// Items chosen for checkout, in the order they were added.
///
/// The same model may be added more than once; each addition is a separate
/// line.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CatalogItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one copy of `item`.
    pub fn add(&mut self, item: CatalogItem) {
        self.items.push(item);
    }

    /// Remove every line for `item_id`. Returns how many were removed.
    pub fn remove(&mut self, item_id: ItemId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        before - self.items.len()
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices, or `None` if it overflows.
    #[must_use]
    pub fn total(&self) -> Option<Price> {
        Price::checked_sum(self.items.iter().map(|item| item.price))
    }

    /// Snapshot the cart as order lines.
    #[must_use]
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(CatalogItem::to_line_item).collect()
    }

    /// Empty the cart, typically after a successful checkout.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
