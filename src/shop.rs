//! Shop controller
//!
//! Turns UI actions into cart mutations and panel state changes, and reports
//! what happened as events. The browser shell re-renders and spawns bursts
//! based on those events; this module never touches the DOM.

use crate::cart::{CartChange, CartStore, MemoryCart};
use crate::catalog::Catalog;
use crate::settings::ShopConfig;
use crate::view::{self, CartViewModel};

/// Something the user did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Add-to-cart button on a product card
    AddToCart(u32),
    /// "+" on a cart line
    Increment(u32),
    /// "-" on a cart line
    Decrement(u32),
    OpenCart,
    CloseCart,
}

/// What the shell should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopEvent {
    /// Cart state changed; re-render the cart view
    CartChanged(CartChange),
    /// Panel and overlay opened/closed
    PanelToggled { open: bool },
    /// Spawn a burst over the clicked product's button
    BurstRequested { id: u32 },
}

pub struct Shop<S: CartStore = MemoryCart> {
    catalog: Catalog,
    cart: S,
    config: ShopConfig,
    panel_open: bool,
}

impl Shop<MemoryCart> {
    /// Shop with an empty in-memory cart
    pub fn with_memory_cart(catalog: Catalog, config: ShopConfig) -> Self {
        Self::new(catalog, MemoryCart::new(), config)
    }
}

impl<S: CartStore> Shop<S> {
    pub fn new(catalog: Catalog, cart: S, config: ShopConfig) -> Self {
        Self {
            catalog,
            cart,
            config,
            panel_open: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &S {
        &self.cart
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Apply one UI action. Unknown ids and stock limits are silent no-ops.
    pub fn dispatch(&mut self, action: UiAction) -> Vec<ShopEvent> {
        let mut events = Vec::new();

        match action {
            UiAction::AddToCart(id) => {
                let Some(product) = self.catalog.find(id) else {
                    log::debug!("Add-to-cart for unknown product {}", id);
                    return events;
                };
                let change = self.cart.add(product);
                if change.is_changed() {
                    events.push(ShopEvent::CartChanged(change));
                }
                events.push(ShopEvent::BurstRequested { id });
            }
            UiAction::Increment(id) => {
                if let Some(product) = self.catalog.find(id) {
                    let change = self.cart.add(product);
                    if change.is_changed() {
                        events.push(ShopEvent::CartChanged(change));
                    }
                } else {
                    log::debug!("Increment for unknown product {}", id);
                }
            }
            UiAction::Decrement(id) => {
                let change = self.cart.remove(id);
                if change.is_changed() {
                    events.push(ShopEvent::CartChanged(change));
                }
            }
            UiAction::OpenCart => {
                self.panel_open = true;
                events.push(ShopEvent::PanelToggled { open: true });
            }
            UiAction::CloseCart => {
                self.panel_open = false;
                events.push(ShopEvent::PanelToggled { open: false });
            }
        }

        events
    }

    /// Current cart view
    pub fn cart_view(&self) -> CartViewModel {
        view::render_cart(&self.cart, &self.config)
    }

    /// Product grid markup
    pub fn catalog_html(&self) -> String {
        view::catalog_html(&self.catalog, &self.config)
    }
}
