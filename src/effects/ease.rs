//! CSS `cubic-bezier()` easing

/// Cubic Bézier timing curve from (0,0) to (1,1) with two control points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    /// The decelerating curve bursts use (CSS `easeOutQuad`)
    pub const EASE_OUT_QUAD: Self = Self::new(0.25, 0.46, 0.45, 0.94);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// CSS notation for use in `transition`
    pub fn css(&self) -> String {
        format!("cubic-bezier({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }

    fn bezier(p1: f32, p2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    }

    fn bezier_slope(p1: f32, p2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
    }

    /// Eased progress for linear progress `t` (clamped to [0, 1])
    pub fn ease(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        // Newton-Raphson for the curve parameter with x(s) = t
        let mut s = t;
        for _ in 0..8 {
            let err = Self::bezier(self.x1, self.x2, s) - t;
            if err.abs() < 1e-6 {
                return Self::bezier(self.y1, self.y2, s);
            }
            let slope = Self::bezier_slope(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        // Bisection fallback
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        s = t;
        for _ in 0..32 {
            let x = Self::bezier(self.x1, self.x2, s);
            if (x - t).abs() < 1e-6 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        Self::bezier(self.y1, self.y2, s)
    }
}
