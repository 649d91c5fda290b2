//! Timing curves for carousel transitions.
//!
//! The host renders the curve natively (CSS `cubic-bezier`), but the
//! controller also evaluates it so the transition ledger can report where a
//! superseded transition had visually reached.

use serde::{Deserialize, Serialize};

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 40;
const SOLVE_TOLERANCE: f64 = 1e-7;

/// Timing function shared by the strip and image transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// CSS cubic Bézier with fixed end points (0,0) and (1,1).
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Default for Easing {
    /// Fast start with a long soft landing: `cubic-bezier(.2,.8,.2,1)`.
    fn default() -> Self {
        Easing::CubicBezier {
            x1: 0.2,
            y1: 0.8,
            x2: 0.2,
            y2: 1.0,
        }
    }
}

impl Easing {
    /// CSS `<easing-function>` text for this curve.
    pub fn to_css(&self) -> String {
        match *self {
            Easing::Linear => "linear".to_string(),
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                format!("cubic-bezier({x1},{y1},{x2},{y2})")
            }
        }
    }

    /// Eased progress for linear progress `t`, both in `[0, 1]`.
    ///
    /// `t` is clamped first, so callers may pass raw elapsed/duration ratios.
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match *self {
            Easing::Linear => t,
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let s = solve_curve_x(t, x1, x2);
                bezier(s, y1, y2)
            }
        }
    }
}

/// One coordinate of a cubic Bézier with end points 0 and 1.
#[inline]
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[inline]
fn bezier_derivative(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x coordinate is `x`.
///
/// Newton's method converges in a few steps for typical curves; flat
/// derivatives fall back to bisection, which always converges because x(s)
/// is monotonic when both control x values are in `[0, 1]`.
fn solve_curve_x(x: f64, x1: f64, x2: f64) -> f64 {
    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < SOLVE_TOLERANCE {
            return s;
        }
        let slope = bezier_derivative(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..BISECTION_ITERATIONS {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < SOLVE_TOLERANCE {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}
