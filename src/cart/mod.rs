//! Shopping cart
//!
//! The cart is a small state machine keyed by product id:
//! - Entries keep insertion order
//! - `1 <= qty <= stock` for every entry
//! - Totals are always derived from the entries, never stored
//!
//! Invalid mutations (over stock, unknown id) are silent no-ops.

pub mod entry;
pub mod store;

pub use entry::{CartChange, CartEntry, CartTotals};
pub use store::{CartStore, MemoryCart};
