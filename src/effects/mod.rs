//! Decorative effects
//!
//! Neither effect touches cart state:
//! - `particles`: the twinkling star field behind the page
//! - `burst`: emoji glyphs thrown up from an add-to-cart click
//! - `animation`: start/stop frame clock driving the field
//! - `ease`: CSS-compatible easing curves

pub mod animation;
pub mod burst;
pub mod ease;
pub mod particles;

pub use animation::AnimationLoop;
pub use burst::{BurstEffect, BurstGlyph, GlyphFrame, RemovalQueue};
pub use ease::CubicBezier;
pub use particles::{Particle, ParticleField};
