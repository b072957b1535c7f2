//! Cart store: the sole owner of cart state

use super::entry::{CartChange, CartEntry, CartTotals};
use crate::catalog::Product;

/// Cart mutation and query interface.
///
/// Views only read through this trait, so a different backing store can be
/// swapped in without touching them.
pub trait CartStore {
    /// Add one unit of `product`. No-op when sold out or at the stock ceiling.
    fn add(&mut self, product: &Product) -> CartChange;

    /// Remove one unit of `product_id`, deleting the entry at qty 1. No-op when absent.
    fn remove(&mut self, product_id: u32) -> CartChange;

    /// Entries in insertion order
    fn entries(&self) -> &[CartEntry];

    /// Drop every entry
    fn clear(&mut self);

    /// Derived totals, recomputed on every call
    fn totals(&self) -> CartTotals {
        CartTotals::from_entries(self.entries())
    }

    fn get(&self, product_id: u32) -> Option<&CartEntry> {
        self.entries().iter().find(|e| e.id() == product_id)
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// In-memory cart, lost on reload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCart {
    entries: Vec<CartEntry>,
}

impl MemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, product_id: u32) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == product_id)
    }
}

impl CartStore for MemoryCart {
    fn add(&mut self, product: &Product) -> CartChange {
        match self.position(product.id) {
            Some(idx) => {
                let entry = &mut self.entries[idx];
                if !entry.can_increment() {
                    log::debug!("Product {} at stock ceiling ({})", product.id, product.stock);
                    return CartChange::Unchanged;
                }
                entry.qty += 1;
                CartChange::Incremented {
                    id: product.id,
                    qty: entry.qty,
                }
            }
            None => {
                if product.stock == 0 {
                    log::debug!("Product {} is sold out", product.id);
                    return CartChange::Unchanged;
                }
                self.entries.push(CartEntry::new(product.clone()));
                CartChange::Added { id: product.id }
            }
        }
    }

    fn remove(&mut self, product_id: u32) -> CartChange {
        let Some(idx) = self.position(product_id) else {
            log::debug!("Remove for product {} not in cart", product_id);
            return CartChange::Unchanged;
        };

        let entry = &mut self.entries[idx];
        if entry.qty > 1 {
            entry.qty -= 1;
            CartChange::Decremented {
                id: product_id,
                qty: entry.qty,
            }
        } else {
            self.entries.remove(idx);
            CartChange::Removed { id: product_id }
        }
    }

    fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{catalog, product};
    use proptest::prelude::*;

    #[test]
    fn test_stock_two_scenario() {
        let p = product(1, 50, 2);
        let mut cart = MemoryCart::new();

        assert_eq!(cart.add(&p), CartChange::Added { id: 1 });
        assert_eq!(cart.get(1).map(|e| e.qty), Some(1));
        assert_eq!(cart.totals().price, 50);

        assert_eq!(cart.add(&p), CartChange::Incremented { id: 1, qty: 2 });
        assert_eq!(cart.totals().price, 100);

        // Stock ceiling
        assert_eq!(cart.add(&p), CartChange::Unchanged);
        assert_eq!(cart.get(1).map(|e| e.qty), Some(2));

        assert_eq!(cart.remove(1), CartChange::Decremented { id: 1, qty: 1 });
        assert_eq!(cart.totals().price, 50);

        assert_eq!(cart.remove(1), CartChange::Removed { id: 1 });
        assert!(cart.is_empty());
        assert_eq!(cart.totals(), CartTotals { items: 0, price: 0 });
    }

    #[test]
    fn test_sold_out_is_noop() {
        let mut cart = MemoryCart::new();
        assert_eq!(cart.add(&product(3, 10, 0)), CartChange::Unchanged);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = MemoryCart::new();
        cart.add(&product(1, 50, 2));
        let before = cart.clone();
        assert_eq!(cart.remove(42), CartChange::Unchanged);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = MemoryCart::new();
        let a = product(1, 50, 5);
        let b = product(2, 10, 5);
        cart.add(&a);
        cart.add(&b);
        cart.add(&b);
        cart.add(&b);
        cart.add(&a);
        let ids: Vec<u32> = cart.entries().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![1, 2]);

        // Removing the first entry keeps the rest in order
        cart.remove(1);
        cart.remove(1);
        let ids: Vec<u32> = cart.entries().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_clear() {
        let mut cart = MemoryCart::new();
        cart.add(&product(2, 120, 5));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.totals().items, 0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Remove(u32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..3).prop_map(Op::Add),
            (0u32..5).prop_map(Op::Remove),
        ]
    }

    fn apply(cart: &mut MemoryCart, op: &Op) -> CartChange {
        let products = catalog();
        match op {
            Op::Add(i) => cart.add(&products.products()[*i]),
            Op::Remove(id) => cart.remove(*id),
        }
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let mut cart = MemoryCart::new();
            for op in &ops {
                apply(&mut cart, op);

                let entries = cart.entries();
                for (i, e) in entries.iter().enumerate() {
                    prop_assert!(e.qty >= 1 && e.qty <= e.product.stock);
                    prop_assert!(entries[..i].iter().all(|o| o.id() != e.id()));
                }

                let items: u64 = entries.iter().map(|e| e.qty as u64).sum();
                let price: u64 = entries.iter().map(|e| e.qty as u64 * e.product.price as u64).sum();
                prop_assert_eq!(cart.totals(), CartTotals { items, price });
            }
        }

        #[test]
        fn prop_add_then_remove_round_trips(
            ops in prop::collection::vec(op_strategy(), 0..30),
            pick in 0usize..3,
        ) {
            let mut cart = MemoryCart::new();
            for op in &ops {
                apply(&mut cart, op);
            }
            let before = cart.clone();
            let products = catalog();
            let p = &products.products()[pick];

            if cart.add(p).is_changed() {
                cart.remove(p.id);
                prop_assert_eq!(cart, before);
            } else {
                // Ceiling or sold out: state untouched
                prop_assert_eq!(cart, before);
            }
        }
    }
}
