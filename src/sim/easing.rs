//! CSS-style cubic Bézier timing functions
//!
//! A timing function maps linear progress `t ∈ [0, 1]` to eased progress.
//! The curve runs from (0, 0) to (1, 1) with two control points; x is time,
//! y is progress. Evaluating it means solving x(s) = t for the curve
//! parameter s, then returning y(s).

use serde::{Deserialize, Serialize};

/// Newton iterations before falling back to bisection
const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f32 = 1e-6;
const SOLVE_EPSILON: f32 = 1e-6;
const BISECTION_ITERATIONS: usize = 32;

/// A cubic Bézier timing curve with fixed endpoints (0,0) and (1,1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    /// Firework flight: slow start, a surge, then a long settle
    pub const FIREWORK: Self = Self::new(0.94, 0.46, 0.45, 0.25);
    /// Launcher glide: sharp start, very soft landing
    pub const LAUNCHER: Self = Self::new(0.19, 1.0, 0.22, 1.0);

    /// Control point x values must lie in [0, 1] for x(s) to be monotone
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased progress for linear progress `t` (clamped to [0, 1])
    pub fn ease(&self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = self.solve_param(t);
        bezier_axis(self.y1, self.y2, s)
    }

    /// Find s such that x(s) = t
    fn solve_param(&self, t: f32) -> f32 {
        let mut s = t;
        for _ in 0..NEWTON_ITERATIONS {
            let err = bezier_axis(self.x1, self.x2, s) - t;
            if err.abs() < SOLVE_EPSILON {
                return s;
            }
            let slope = bezier_slope(self.x1, self.x2, s);
            if slope.abs() < NEWTON_MIN_SLOPE {
                break;
            }
            s -= err / slope;
            if !(0.0..=1.0).contains(&s) {
                break;
            }
        }

        // Newton stalled or overshot; x(s) is monotone so bisection converges
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = t;
        for _ in 0..BISECTION_ITERATIONS {
            let x = bezier_axis(self.x1, self.x2, s);
            if (x - t).abs() < SOLVE_EPSILON {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        s
    }
}

/// One axis of the curve: 3(1-s)²s·p1 + 3(1-s)s²·p2 + s³
#[inline]
fn bezier_axis(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

/// Derivative of `bezier_axis` with respect to s
#[inline]
fn bezier_slope(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}
