//! Bounds and elasticity math.
//!
//! These are the pure pieces of the controller: converting pointer travel to
//! a percentage of the strip, picking the dominant wheel axis, and damping
//! overshoot past the travel bounds.
//!
//! # Sign Convention
//!
//! Offsets are percentages of the strip's own width. `0` is the home
//! position and negative values move content further left. Dragging the
//! pointer left (a positive `anchor - pointer` delta) produces a negative
//! percentage delta.

/// Clamp `value` into `[min, max]`.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Apply rubber-band damping to a wanted offset.
///
/// Inside `[min, max]` the value passes through unchanged. Past a bound by
/// `d`, the result sits `d * elasticity` past that bound, so the further the
/// user pushes the smaller the visible gain.
///
/// # Example
///
/// ```ignore
/// // 5 points below -75 with elasticity 0.35 lands 1.75 points below
/// assert!((rubber_band(-80.0, -75.0, 0.0, 0.35) - -76.75).abs() < 1e-9);
/// ```
pub fn rubber_band(wanted: f64, min: f64, max: f64, elasticity: f64) -> f64 {
    if wanted > max {
        max + (wanted - max) * elasticity
    } else if wanted < min {
        min + (wanted - min) * elasticity
    } else {
        wanted
    }
}

/// Whether `value` lies inside `[min, max]`, bounds included.
#[inline]
pub fn in_bounds(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

/// Convert horizontal pointer travel in pixels to a percentage delta.
///
/// Travel is normalized by half the viewport width, so dragging across half
/// the screen moves the strip by 100% of its width. An unusable viewport
/// width (zero, negative or non-finite) yields no movement.
pub fn pointer_delta_to_percent(delta_px: f64, viewport_width: f64) -> f64 {
    let half_width = viewport_width / 2.0;
    if !half_width.is_finite() || half_width <= 0.0 {
        return 0.0;
    }
    (delta_px / half_width) * -100.0
}

/// Pick the wheel component with the larger magnitude.
///
/// Trackpads report horizontal swipes in `dx` and mice report `dy`; using
/// whichever dominates treats both the same way. Ties go to `dy`. Returns
/// `None` when the chosen component is not a finite number.
pub fn dominant_delta(dx: f64, dy: f64) -> Option<f64> {
    let delta = if dx.abs() > dy.abs() { dx } else { dy };
    delta.is_finite().then_some(delta)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const MIN: f64 = -75.0;
    const MAX: f64 = 0.0;

    proptest! {
        /// Property: overshoot distance is scaled exactly by the elasticity.
        #[test]
        fn prop_overshoot_scaled_by_elasticity(
            excess in 0.001f64..500.0,
            elasticity in 0.01f64..0.99,
            below in any::<bool>(),
        ) {
            let (wanted, bound) = if below { (MIN - excess, MIN) } else { (MAX + excess, MAX) };
            let target = rubber_band(wanted, MIN, MAX, elasticity);
            let distance = (target - bound).abs();

            prop_assert!((distance - excess * elasticity).abs() < 1e-9);
            prop_assert!(distance < excess, "Damped distance should be sub-unity");
        }

        /// Property: damping preserves ordering of wanted offsets.
        #[test]
        fn prop_rubber_band_monotonic(
            a in -400.0f64..400.0,
            b in -400.0f64..400.0,
            elasticity in 0.01f64..0.99,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                rubber_band(lo, MIN, MAX, elasticity) <= rubber_band(hi, MIN, MAX, elasticity)
            );
        }

        /// Property: clamp always lands in range.
        #[test]
        fn prop_clamp_in_bounds(value in -1000.0f64..1000.0) {
            prop_assert!(in_bounds(clamp(value, MIN, MAX), MIN, MAX));
        }
    }
}
