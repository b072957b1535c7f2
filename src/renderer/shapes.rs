//! Shape generation for the star sprites

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

/// Number of star arms
pub const STAR_ARMS: usize = 4;

/// A 4-pointed star with a round core, ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarSprite<'a> {
    /// Center in surface pixels
    pub pos: Vec2,
    /// Rotation (radians)
    pub rotation: f32,
    /// Twinkle-scaled size
    pub size: f32,
    /// Effective opacity (0-1)
    pub alpha: f32,
    /// CSS color
    pub color: &'a str,
}

impl StarSprite<'_> {
    /// Arm length from center to tip
    pub fn arm_length(&self) -> f32 {
        self.size * 2.0
    }

    /// Stroke width for the arms
    pub fn stroke_width(&self) -> f32 {
        self.size * 0.5
    }

    /// Radius of the filled core
    pub fn core_radius(&self) -> f32 {
        self.size * 0.4
    }

    /// Arm tip positions in surface space, arms a quarter turn apart
    pub fn arm_tips(&self) -> [Vec2; STAR_ARMS] {
        let len = self.arm_length();
        std::array::from_fn(|i| {
            let angle = self.rotation + i as f32 * FRAC_PI_2;
            self.pos + Vec2::new(angle.cos(), angle.sin()) * len
        })
    }
}
