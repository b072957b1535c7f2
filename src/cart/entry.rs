//! Cart line items and derived values

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// One cart line: a product snapshot and a quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product: Product,
    /// Always within `1..=product.stock`
    pub qty: u32,
}

impl CartEntry {
    pub fn new(product: Product) -> Self {
        Self { product, qty: 1 }
    }

    pub fn id(&self) -> u32 {
        self.product.id
    }

    /// Price of this line (qty * unit price)
    pub fn line_total(&self) -> u64 {
        self.qty as u64 * self.product.price as u64
    }

    /// Whether another unit fits under the stock ceiling
    pub fn can_increment(&self) -> bool {
        self.qty < self.product.stock
    }
}

/// Totals derived from the current entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of quantities
    pub items: u64,
    /// Sum of qty * price
    pub price: u64,
}

impl CartTotals {
    pub fn from_entries(entries: &[CartEntry]) -> Self {
        entries.iter().fold(Self::default(), |acc, e| Self {
            items: acc.items + e.qty as u64,
            price: acc.price + e.line_total(),
        })
    }
}

/// Outcome of a cart mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// New entry created with qty 1
    Added { id: u32 },
    /// Existing entry went up by one
    Incremented { id: u32, qty: u32 },
    /// Existing entry went down by one
    Decremented { id: u32, qty: u32 },
    /// Entry deleted (qty would have hit zero)
    Removed { id: u32 },
    /// Nothing happened (stock ceiling, sold out or unknown id)
    Unchanged,
}

impl CartChange {
    /// Whether the view needs a refresh
    pub fn is_changed(&self) -> bool {
        !matches!(self, CartChange::Unchanged)
    }
}
