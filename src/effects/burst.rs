//! Click bursts
//!
//! A burst throws a handful of emoji glyphs up and out from a point. Each glyph
//! has two independent lifetimes:
//! - a visual transition (eased move + fade) over `burst_transition_ms`
//! - a removal deadline `burst_lifetime_ms` after spawn
//!
//! Removal never waits on the transition, so a glyph whose transition never
//! rendered still gets cleaned up.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ease::CubicBezier;
use crate::settings::ShopConfig;

/// One emoji glyph in flight
#[derive(Debug, Clone, PartialEq)]
pub struct BurstGlyph {
    pub id: u64,
    /// Spawn point (viewport pixels)
    pub origin: Vec2,
    pub glyph: String,
    /// Font size (px)
    pub font_size: f32,
    /// Final displacement from the origin
    pub offset: Vec2,
    /// Final rotation (degrees)
    pub rotation_deg: f32,
    /// Spawn time (ms)
    pub created_at: f64,
}

/// Where a glyph is at some point of its transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphFrame {
    pub pos: Vec2,
    pub rotation_deg: f32,
    pub opacity: f32,
}

impl BurstGlyph {
    /// Linear transition progress in [0, 1]
    pub fn progress(&self, now: f64, transition_ms: f64) -> f32 {
        if transition_ms <= 0.0 {
            return 1.0;
        }
        ((now - self.created_at) / transition_ms).clamp(0.0, 1.0) as f32
    }

    /// Position, rotation and opacity at `now`, following the CSS transition
    pub fn sample(&self, now: f64, transition_ms: f64) -> GlyphFrame {
        let eased = CubicBezier::EASE_OUT_QUAD.ease(self.progress(now, transition_ms));
        GlyphFrame {
            pos: self.origin + self.offset * eased,
            rotation_deg: self.rotation_deg * eased,
            opacity: 1.0 - eased,
        }
    }

    /// Time (ms) at which the glyph must be gone
    pub fn removal_at(&self, lifetime_ms: f64) -> f64 {
        self.created_at + lifetime_ms
    }

    /// Inline style at spawn
    pub fn initial_style(&self, transition_ms: f64) -> String {
        format!(
            "position: fixed; left: {}px; top: {}px; pointer-events: none; z-index: 9999; \
             font-size: {:.1}px; transition: all {}s {}; opacity: 1;",
            self.origin.x,
            self.origin.y,
            self.font_size,
            transition_ms / 1000.0,
            CubicBezier::EASE_OUT_QUAD.css(),
        )
    }

    /// CSS transform for the end of the transition
    pub fn final_transform(&self) -> String {
        format!(
            "translate({:.1}px, {:.1}px) rotate({:.1}deg)",
            self.offset.x, self.offset.y, self.rotation_deg
        )
    }
}

/// Pending glyph removals, ordered by deadline
#[derive(Debug, Clone, Default)]
pub struct RemovalQueue {
    deadlines: Vec<(f64, u64)>,
}

impl RemovalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `id` for removal at `at` (ms)
    pub fn schedule(&mut self, id: u64, at: f64) {
        let idx = self.deadlines.partition_point(|(t, _)| *t <= at);
        self.deadlines.insert(idx, (at, id));
    }

    /// Remove and return every id whose deadline is at or before `now`
    pub fn drain_due(&mut self, now: f64) -> Vec<u64> {
        let due = self.deadlines.partition_point(|(t, _)| *t <= now);
        self.deadlines.drain(..due).map(|(_, id)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

/// Burst spawner
#[derive(Debug, Clone)]
pub struct BurstEffect {
    rng: Pcg32,
    next_id: u64,
    count: usize,
    glyphs: Vec<String>,
    font_min: f32,
    font_max: f32,
    transition_ms: f64,
    lifetime_ms: f64,
    removals: RemovalQueue,
}

impl BurstEffect {
    pub fn new(config: &ShopConfig, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            count: config.burst_count,
            glyphs: config.burst_glyphs.clone(),
            font_min: config.burst_font_min,
            font_max: config.burst_font_max,
            transition_ms: config.burst_transition_ms,
            lifetime_ms: config.burst_lifetime_ms,
            removals: RemovalQueue::new(),
        }
    }

    pub fn transition_ms(&self) -> f64 {
        self.transition_ms
    }

    pub fn lifetime_ms(&self) -> f64 {
        self.lifetime_ms
    }

    /// Spawn a burst at (`x`, `y`) and schedule each glyph's removal
    pub fn burst(&mut self, x: f32, y: f32, now: f64) -> Vec<BurstGlyph> {
        if self.glyphs.is_empty() {
            return Vec::new();
        }

        let origin = Vec2::new(x, y);
        let mut spawned = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            let id = self.next_id;
            self.next_id += 1;

            let glyph = BurstGlyph {
                id,
                origin,
                glyph: self.glyphs[self.rng.random_range(0..self.glyphs.len())].clone(),
                font_size: self.font_min + self.rng.random::<f32>() * (self.font_max - self.font_min),
                offset: Vec2::new(
                    (self.rng.random::<f32>() - 0.5) * 120.0,
                    -60.0 - self.rng.random::<f32>() * 80.0,
                ),
                rotation_deg: self.rng.random::<f32>() * 360.0,
                created_at: now,
            };
            self.removals.schedule(id, glyph.removal_at(self.lifetime_ms));
            spawned.push(glyph);
        }

        log::debug!("Burst of {} at ({:.0}, {:.0})", spawned.len(), x, y);
        spawned
    }

    /// Glyph ids whose removal time has passed
    pub fn drain_due(&mut self, now: f64) -> Vec<u64> {
        self.removals.drain_due(now)
    }

    /// Glyphs still waiting for removal
    pub fn live(&self) -> usize {
        self.removals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect() -> BurstEffect {
        BurstEffect::new(&ShopConfig::default(), 99)
    }

    #[test]
    fn test_burst_spawns_eight_glyphs() {
        let config = ShopConfig::default();
        let mut fx = effect();
        let glyphs = fx.burst(200.0, 300.0, 1000.0);
        assert_eq!(glyphs.len(), 8);
        assert_eq!(fx.live(), 8);

        for g in &glyphs {
            assert_eq!(g.origin, Vec2::new(200.0, 300.0));
            assert!(config.burst_glyphs.contains(&g.glyph));
            assert!(g.font_size >= 14.0 && g.font_size < 28.0);
            assert!(g.offset.x >= -60.0 && g.offset.x < 60.0);
            assert!(g.offset.y <= -60.0 && g.offset.y > -140.0);
            assert!(g.rotation_deg >= 0.0 && g.rotation_deg < 360.0);
            assert_eq!(g.created_at, 1000.0);
        }

        // Ids are unique
        let mut ids: Vec<u64> = glyphs.iter().map(|g| g.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_removal_fires_after_lifetime() {
        let mut fx = effect();
        fx.burst(0.0, 0.0, 1000.0);

        assert!(fx.drain_due(1000.0 + 899.0).is_empty());
        let removed = fx.drain_due(1000.0 + 900.0);
        assert_eq!(removed.len(), 8);
        assert_eq!(fx.live(), 0);
        // Nothing removed twice
        assert!(fx.drain_due(5000.0).is_empty());
    }

    #[test]
    fn test_removal_independent_of_transition() {
        // Glyphs never sampled still get removed
        let mut fx = effect();
        let first = fx.burst(10.0, 10.0, 0.0);
        let second = fx.burst(20.0, 20.0, 500.0);

        let due: Vec<u64> = fx.drain_due(950.0);
        assert_eq!(due, first.iter().map(|g| g.id).collect::<Vec<_>>());
        let due: Vec<u64> = fx.drain_due(1400.0);
        assert_eq!(due, second.iter().map(|g| g.id).collect::<Vec<_>>());
    }

    #[test]
    fn test_sample_follows_eased_transition() {
        let mut fx = effect();
        let g = fx.burst(100.0, 100.0, 0.0).remove(0);
        let transition = fx.transition_ms();

        let start = g.sample(0.0, transition);
        assert_eq!(start.pos, g.origin);
        assert_eq!(start.opacity, 1.0);

        let end = g.sample(transition, transition);
        assert!(end.pos.distance(g.origin + g.offset) < 1e-3);
        assert_eq!(end.opacity, 0.0);

        // Past the transition the glyph holds its final frame
        assert_eq!(g.sample(transition * 2.0, transition), end);

        // Decelerating: more than half the distance by the midpoint
        let mid = g.sample(transition / 2.0, transition);
        let travelled = mid.pos.distance(g.origin) / g.offset.length();
        assert!(travelled > 0.5);
    }

    #[test]
    fn test_css_strings() {
        let g = BurstGlyph {
            id: 1,
            origin: Vec2::new(12.0, 34.0),
            glyph: "✨".to_string(),
            font_size: 20.0,
            offset: Vec2::new(-5.0, -70.0),
            rotation_deg: 90.0,
            created_at: 0.0,
        };
        let style = g.initial_style(800.0);
        assert!(style.contains("left: 12px; top: 34px"));
        assert!(style.contains("transition: all 0.8s cubic-bezier(0.25, 0.46, 0.45, 0.94)"));
        assert_eq!(g.final_transform(), "translate(-5.0px, -70.0px) rotate(90.0deg)");
    }

    #[test]
    fn test_removal_queue_orders_by_deadline() {
        let mut q = RemovalQueue::new();
        q.schedule(3, 300.0);
        q.schedule(1, 100.0);
        q.schedule(2, 200.0);
        assert_eq!(q.drain_due(250.0), vec![1, 2]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.drain_due(300.0), vec![3]);
        assert!(q.is_empty());
    }
}
