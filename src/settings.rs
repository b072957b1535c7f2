//! Shop configuration
//!
//! Everything tunable lives here with defaults matching the shipped look.
//! There is no environment or storage layer: the shell uses `ShopConfig::default()`,
//! and `from_json` exists for embedding pages that want to override values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("particle palette must contain at least one color")]
    EmptyPalette,
    #[error("burst glyph set must contain at least one glyph")]
    EmptyGlyphs,
    #[error("burst font size range {min}..{max} is empty")]
    EmptyFontRange { min: f32, max: f32 },
}

/// Background density presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SparklePreset {
    Subtle,
    #[default]
    Normal,
    Dazzling,
}

impl SparklePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SparklePreset::Subtle => "Subtle",
            SparklePreset::Normal => "Normal",
            SparklePreset::Dazzling => "Dazzling",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "subtle" | "low" => Some(SparklePreset::Subtle),
            "normal" | "medium" => Some(SparklePreset::Normal),
            "dazzling" | "high" => Some(SparklePreset::Dazzling),
            _ => None,
        }
    }

    /// Particle pool size for this preset
    pub fn particle_count(&self) -> usize {
        match self {
            SparklePreset::Subtle => 20,
            SparklePreset::Normal => PARTICLE_COUNT,
            SparklePreset::Dazzling => 150,
        }
    }
}

/// Shop-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    // === Catalog ===
    /// URL of the static product list
    pub catalog_url: String,

    // === Particle field ===
    /// Fixed pool size for the particle field
    pub particle_count: usize,
    /// Off-screen margin before wrap/respawn (pixels)
    pub particle_margin: f32,
    /// CSS colors particles draw from
    pub palette: Vec<String>,

    // === Bursts ===
    /// Glyphs per burst
    pub burst_count: usize,
    /// Glyph set bursts pick from
    pub burst_glyphs: Vec<String>,
    /// Font size range (px)
    pub burst_font_min: f32,
    pub burst_font_max: f32,
    /// Transition duration (ms)
    pub burst_transition_ms: f64,
    /// Removal delay (ms)
    pub burst_lifetime_ms: f64,

    // === Text ===
    /// Currency suffix for prices
    pub currency: String,
    /// Shown in place of the item list when the cart is empty
    pub empty_cart_message: String,
    /// Add-to-cart button label
    pub add_to_cart_label: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            catalog_url: "products.json".to_string(),

            particle_count: PARTICLE_COUNT,
            particle_margin: PARTICLE_MARGIN,
            palette: ["#ff006e", "#ffbe0b", "#8338ec", "#06d6a0", "#fb5607", "#fff", "#ff85a1"]
                .iter()
                .map(|c| c.to_string())
                .collect(),

            burst_count: BURST_COUNT,
            burst_glyphs: ["✨", "⭐", "💖", "🌟", "💫", "🎉", "🍬"]
                .iter()
                .map(|g| g.to_string())
                .collect(),
            burst_font_min: 14.0,
            burst_font_max: 28.0,
            burst_transition_ms: BURST_TRANSITION_MS,
            burst_lifetime_ms: BURST_LIFETIME_MS,

            currency: "kr".to_string(),
            empty_cart_message: "🛒 Handlekurven er tom enda...".to_string(),
            add_to_cart_label: "🛒 Legg i handlekurv".to_string(),
        }
    }
}

impl ShopConfig {
    /// Create a config from a sparkle preset (other values default)
    pub fn from_preset(preset: SparklePreset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a sparkle preset
    pub fn apply_preset(&mut self, preset: SparklePreset) {
        self.particle_count = preset.particle_count();
    }

    /// Parse a (possibly partial) JSON override; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the effects rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.burst_glyphs.is_empty() {
            return Err(ConfigError::EmptyGlyphs);
        }
        if !(self.burst_font_min < self.burst_font_max) {
            return Err(ConfigError::EmptyFontRange {
                min: self.burst_font_min,
                max: self.burst_font_max,
            });
        }
        Ok(())
    }

    /// Format a price with the configured currency
    pub fn format_price(&self, amount: u64) -> String {
        format!("{} {}", amount, self.currency)
    }
}
