//! Glitter Shop - a sparkly storefront running in the browser
//!
//! Core modules:
//! - `catalog`: Product records and the one-shot catalog load
//! - `cart`: Cart state machine (add/remove/totals)
//! - `shop`: UI action routing between catalog, cart and panel
//! - `view`: Pure projections of catalog and cart state into markup
//! - `effects`: Twinkling particle field and click bursts
//! - `renderer`: Star sprite geometry and the Canvas 2D backend
//! - `settings`: Tunables with sensible defaults

pub mod cart;
pub mod catalog;
pub mod effects;
pub mod renderer;
pub mod settings;
pub mod shop;
pub mod view;

pub use cart::{CartChange, CartStore, CartTotals, MemoryCart};
pub use catalog::{Catalog, CatalogError, Product};
pub use settings::ShopConfig;
pub use shop::{Shop, ShopEvent, UiAction};

/// Shared constants
pub mod consts {
    /// Number of particles in the background field
    pub const PARTICLE_COUNT: usize = 60;
    /// Off-screen margin before a particle wraps or respawns (pixels)
    pub const PARTICLE_MARGIN: f32 = 10.0;
    /// Twinkle rates are tuned per 60 Hz frame
    pub const TWINKLE_FRAME_RATE: f32 = 60.0;
    /// Star rotation speed (radians per second)
    pub const STAR_SPIN: f32 = 0.5;

    /// Glyphs spawned per burst
    pub const BURST_COUNT: usize = 8;
    /// Glyph transition duration (ms)
    pub const BURST_TRANSITION_MS: f64 = 800.0;
    /// Glyph removal delay (ms), fires regardless of transition state
    pub const BURST_LIFETIME_MS: f64 = 900.0;

    /// Nominal frame duration used when advancing without a clock (seconds)
    pub const FRAME_DT: f64 = 1.0 / 60.0;
}

/// Escape text for interpolation into HTML markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
