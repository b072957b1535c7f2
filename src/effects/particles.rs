//! Twinkling particle field
//!
//! A fixed pool of particles drifts down the surface. Particles are recycled
//! in place: falling off the bottom respawns at the top, leaving either side
//! wraps to the other. Nothing is allocated per frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use crate::consts::*;
use crate::renderer::{DrawSurface, StarSprite};
use crate::settings::ShopConfig;

/// One background particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub size: f32,
    pub color: String,
    pub base_opacity: f32,
    /// Twinkle cycles per frame-tick (scaled by 60 per second)
    pub twinkle_rate: f32,
    /// Phase offset (radians), also offsets the star rotation
    pub twinkle_phase: f32,
}

impl Particle {
    /// Randomize a particle somewhere on a `width` x `height` surface
    pub fn spawn(rng: &mut Pcg32, width: f32, height: f32, palette: &[String]) -> Self {
        let color = if palette.is_empty() {
            "#fff".to_string()
        } else {
            palette[rng.random_range(0..palette.len())].clone()
        };
        Self {
            pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 0.4,
                rng.random::<f32>() * 0.25 + 0.05,
            ),
            size: rng.random::<f32>() * 2.5 + 0.5,
            color,
            base_opacity: rng.random::<f32>() * 0.5 + 0.2,
            twinkle_rate: rng.random::<f32>() * 0.02 + 0.008,
            twinkle_phase: rng.random::<f32>() * TAU,
        }
    }

    /// Brightness factor in [0, 1] at global `time` (seconds)
    pub fn twinkle(&self, time: f64) -> f32 {
        let angle = time * (self.twinkle_rate * TWINKLE_FRAME_RATE) as f64 + self.twinkle_phase as f64;
        (0.5 + 0.5 * angle.sin()) as f32
    }

    /// Opacity after twinkle
    pub fn opacity(&self, time: f64) -> f32 {
        self.base_opacity * self.twinkle(time)
    }

    /// Size after twinkle, between 0.8x and 1.2x
    pub fn draw_size(&self, time: f64) -> f32 {
        self.size * (0.8 + 0.4 * self.twinkle(time))
    }

    /// Star rotation at global `time`
    pub fn rotation(&self, time: f64) -> f32 {
        (time * STAR_SPIN as f64) as f32 + self.twinkle_phase
    }

    pub fn sprite(&self, time: f64) -> StarSprite<'_> {
        StarSprite {
            pos: self.pos,
            rotation: self.rotation(time),
            size: self.draw_size(time),
            alpha: self.opacity(time),
            color: &self.color,
        }
    }
}

/// The particle pool and the surface it lives on
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    margin: f32,
    rng: Pcg32,
}

impl ParticleField {
    /// Allocate `config.particle_count` particles over a `width` x `height` surface
    pub fn new(config: &ShopConfig, width: f32, height: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..config.particle_count)
            .map(|_| Particle::spawn(&mut rng, width, height, &config.palette))
            .collect();
        Self {
            particles,
            width,
            height,
            margin: config.particle_margin,
            rng,
        }
    }

    /// Track a new surface size. Existing positions are left where they are.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Move every particle one frame, then respawn/wrap
    pub fn step(&mut self) {
        let (w, h, m) = (self.width, self.height, self.margin);
        for p in &mut self.particles {
            p.pos += p.vel;

            if p.pos.y > h + m {
                p.pos.y = -m;
                p.pos.x = self.rng.random::<f32>() * w;
            }
            if p.pos.x < -m {
                p.pos.x = w + m;
            } else if p.pos.x > w + m {
                p.pos.x = -m;
            }
        }
    }

    /// Sprites for the current positions at global `time`
    pub fn sprites(&self, time: f64) -> impl Iterator<Item = StarSprite<'_>> {
        self.particles.iter().map(move |p| p.sprite(time))
    }

    /// One display tick: clear, advance, draw
    pub fn frame<S: DrawSurface>(&mut self, time: f64, surface: &mut S) {
        surface.clear();
        self.step();
        for star in self.sprites(time) {
            surface.draw_star(&star);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        stars: Vec<(Vec2, f32, f32, String)>,
    }

    impl DrawSurface for RecordingSurface {
        fn size(&self) -> (f32, f32) {
            (800.0, 600.0)
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.stars.clear();
        }

        fn draw_star(&mut self, star: &StarSprite<'_>) {
            self.stars
                .push((star.pos, star.size, star.alpha, star.color.to_string()));
        }
    }

    fn field() -> ParticleField {
        ParticleField::new(&ShopConfig::default(), 800.0, 600.0, 42)
    }

    #[test]
    fn test_initial_pool() {
        let field = field();
        let config = ShopConfig::default();
        assert_eq!(field.particles().len(), 60);
        for p in field.particles() {
            assert!(p.pos.x >= 0.0 && p.pos.x < 800.0);
            assert!(p.pos.y >= 0.0 && p.pos.y < 600.0);
            assert!(p.vel.x >= -0.2 && p.vel.x < 0.2);
            assert!(p.vel.y >= 0.05 && p.vel.y < 0.3);
            assert!(p.size >= 0.5 && p.size < 3.0);
            assert!(p.base_opacity >= 0.2 && p.base_opacity < 0.7);
            assert!(p.twinkle_rate >= 0.008 && p.twinkle_rate < 0.028);
            assert!(config.palette.contains(&p.color));
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = field();
        let b = field();
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_step_advances_by_velocity() {
        let mut field = field();
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();
        field.particles_mut()[0].pos = Vec2::new(400.0, 300.0);
        field.particles_mut()[0].vel = Vec2::new(0.1, 0.2);
        field.step();
        let p = &field.particles()[0];
        assert!(p.pos.distance(Vec2::new(400.1, 300.2)) < 1e-4);
        // Pool size never changes
        assert_eq!(field.particles().len(), before.len());
    }

    #[test]
    fn test_respawn_at_top() {
        let mut field = field();
        let margin = field.margin();
        for _ in 0..50 {
            field.particles_mut()[3].pos = Vec2::new(123.0, 600.0 + margin - 0.01);
            field.particles_mut()[3].vel = Vec2::new(0.0, 0.2);
            field.step();
            let p = &field.particles()[3];
            assert_eq!(p.pos.y, -margin);
            assert!(p.pos.x >= 0.0 && p.pos.x < 800.0);
        }
    }

    #[test]
    fn test_horizontal_wrap() {
        let mut field = field();
        let m = field.margin();

        field.particles_mut()[0].pos = Vec2::new(-m + 0.05, 100.0);
        field.particles_mut()[0].vel = Vec2::new(-0.1, 0.0);
        field.step();
        assert_eq!(field.particles()[0].pos.x, 800.0 + m);

        field.particles_mut()[1].pos = Vec2::new(800.0 + m - 0.05, 100.0);
        field.particles_mut()[1].vel = Vec2::new(0.1, 0.0);
        field.step();
        assert_eq!(field.particles()[1].pos.x, -m);
    }

    #[test]
    fn test_resize_keeps_positions() {
        let mut field = field();
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();
        field.resize(320.0, 240.0);
        let after: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
        assert_eq!(field.size(), (320.0, 240.0));
    }

    #[test]
    fn test_twinkle_bounds_and_scaling() {
        let field = field();
        for p in field.particles() {
            for i in 0..100 {
                let t = i as f64 * 0.37;
                let tw = p.twinkle(t);
                assert!((0.0..=1.0).contains(&tw));
                assert!((p.opacity(t) - p.base_opacity * tw).abs() < 1e-6);
                let s = p.draw_size(t);
                assert!(s >= p.size * 0.8 - 1e-5 && s <= p.size * 1.2 + 1e-5);
            }
        }
    }

    #[test]
    fn test_twinkle_formula() {
        let mut p = field().particles()[0].clone();
        p.twinkle_rate = 0.01;
        p.twinkle_phase = 0.0;
        // sin(0) = 0 -> half brightness
        assert!((p.twinkle(0.0) - 0.5).abs() < 1e-6);
        // rate*60 = 0.6 rad/s; peak at t = (pi/2) / 0.6
        let peak = std::f64::consts::FRAC_PI_2 / 0.6;
        assert!((p.twinkle(peak) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_frame_draws_every_particle() {
        let mut field = field();
        let mut surface = RecordingSurface::default();
        for frame in 0..5 {
            field.frame(frame as f64 / 60.0, &mut surface);
        }
        assert_eq!(surface.clears, 5);
        assert_eq!(surface.stars.len(), 60);
        let positions: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();
        let drawn: Vec<Vec2> = surface.stars.iter().map(|s| s.0).collect();
        assert_eq!(positions, drawn);
    }
}
