//! Cart panel projection
//!
//! Three regions come from the same state: the header badge, the item list,
//! and the footer with the total.

use super::gradient_css;
use crate::cart::CartStore;
use crate::escape_html;
use crate::settings::ShopConfig;

/// One rendered cart line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    /// Product id bound to the +/- buttons
    pub id: u32,
    pub name: String,
    pub emoji: String,
    pub gradient: [String; 2],
    pub price_label: String,
    pub qty: u32,
}

impl CartItemView {
    pub fn to_html(&self) -> String {
        let emoji = escape_html(&self.emoji);
        format!(
            r#"<div class="cart-item">
  <div class="cart-item-emoji" style="background: {gradient}">{emoji}</div>
  <div class="cart-item-info">
    <h3>{emoji} {name}</h3>
    <span class="cart-item-price">{price}</span>
  </div>
  <div class="cart-item-controls">
    <button data-id="{id}" class="cart-minus">&minus;</button>
    <span>{qty}</span>
    <button data-id="{id}" class="cart-plus">&plus;</button>
  </div>
</div>"#,
            gradient = gradient_css(&self.gradient),
            emoji = emoji,
            name = escape_html(&self.name),
            price = escape_html(&self.price_label),
            id = self.id,
            qty = self.qty,
        )
    }
}

/// Item list region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartItems {
    /// Placeholder message when nothing is in the cart
    Empty(String),
    List(Vec<CartItemView>),
}

/// Everything the cart panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartViewModel {
    /// Header badge text, blank when the cart is empty
    pub badge: String,
    pub items: CartItems,
    /// Footer total text
    pub total: String,
    /// Footer is hidden (`display: none`) for an empty cart
    pub footer_visible: bool,
}

impl CartViewModel {
    /// Markup replacing the whole item list
    pub fn items_html(&self) -> String {
        match &self.items {
            CartItems::Empty(message) => {
                format!(r#"<p class="cart-empty">{}</p>"#, escape_html(message))
            }
            CartItems::List(items) => items.iter().map(CartItemView::to_html).collect(),
        }
    }

    /// Inline `display` value for the footer
    pub fn footer_display(&self) -> &'static str {
        if self.footer_visible { "" } else { "none" }
    }
}

/// Project cart state into its view
pub fn render_cart<S: CartStore + ?Sized>(cart: &S, config: &ShopConfig) -> CartViewModel {
    let totals = cart.totals();

    let items = if cart.is_empty() {
        CartItems::Empty(config.empty_cart_message.clone())
    } else {
        CartItems::List(
            cart.entries()
                .iter()
                .map(|e| CartItemView {
                    id: e.product.id,
                    name: e.product.name.clone(),
                    emoji: e.product.emoji.clone(),
                    gradient: e.product.gradient.clone(),
                    price_label: config.format_price(e.product.price as u64),
                    qty: e.qty,
                })
                .collect(),
        )
    };

    CartViewModel {
        badge: if totals.items == 0 {
            String::new()
        } else {
            totals.items.to_string()
        },
        items,
        total: config.format_price(totals.price),
        footer_visible: !cart.is_empty(),
    }
}
