//! Pure projections of shop state into view descriptions
//!
//! Nothing here touches the DOM. The browser shell applies the descriptions
//! by full replacement of each region.

pub mod cart;
pub mod catalog;

pub use cart::{CartItemView, CartItems, CartViewModel, render_cart};
pub use catalog::{IconPlacement, ProductCardView, catalog_html, render_catalog};

/// CSS background for a two-stop gradient
pub fn gradient_css(gradient: &[String; 2]) -> String {
    format!(
        "linear-gradient(135deg, {}, {})",
        crate::escape_html(&gradient[0]),
        crate::escape_html(&gradient[1])
    )
}
