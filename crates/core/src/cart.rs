//! Cart line items, totals and the stored snapshot.
//!
//! The cart owns copies of the products it holds. Once a line item is added,
//! later catalog changes do not reach it.
//!
//! # Invariants
//!
//! - At most one line item per product id.
//! - Every quantity is at least 1; removing a line deletes it outright.
//!
//! Both hold for carts built through [`Cart::add`] and for carts restored
//! from a snapshot, since deserialization rejects duplicate ids and zero
//! quantities.

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// One row of the cart: a snapshot of a product plus a quantity.
///
/// Serialized flat, e.g. `{"id": 2, "name": "...", ..., "quantity": 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartItem {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Product id of this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity.get()
    }
}

/// Derived totals over the current line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of quantities.
    pub item_count: u32,
    /// Sum of price × quantity.
    pub total_price: Price,
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for the same id, or appends a new line
    /// holding a copy of the product. Returns the line's new quantity.
    pub fn add(&mut self, product: &Product) -> NonZeroU32 {
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }
        self.items.push(CartItem::new(product.clone()));
        NonZeroU32::MIN
    }

    /// Delete the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    /// Delete every line. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Item count and total price, recomputed from the lines.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self
                .items
                .iter()
                .map(|item| item.quantity.get())
                .fold(0u32, u32::saturating_add),
            total_price: self.items.iter().map(CartItem::line_total).sum(),
        }
    }

    /// Restore a cart from its stored JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an array of line items, or if it
    /// breaks a cart invariant.
    pub fn from_snapshot(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Encode the cart as its stored JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_snapshot(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<CartItem>::deserialize(deserializer)?;
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(D::Error::custom(format!(
                    "duplicate cart line for product {}",
                    item.id()
                )));
            }
        }
        Ok(Self { items })
    }
}
