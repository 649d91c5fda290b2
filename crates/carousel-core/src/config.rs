//! Policy constants for the carousel controller.
//!
//! Every number the controller uses lives here so that a page can tune the
//! feel of the strip at startup. The defaults reproduce the stock carousel:
//! a travel range of -75% to 0%, a rubber band of 0.35 and short eased
//! transitions.
//!
//! Configuration is plain data (`serde`), so the WASM layer can accept a
//! partial JS object and fill the rest from [`CarouselConfig::default`].

use crate::transition::Easing;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a configuration is rejected by [`CarouselConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Travel bounds are not finite or not strictly ordered.
    #[error("invalid travel bounds: min {min} must be finite and below max {max}")]
    InvalidBounds { min: f64, max: f64 },

    /// Elasticity outside the open interval (0, 1).
    #[error("elasticity must be within (0, 1), got {0}")]
    InvalidElasticity(f64),

    /// Negative or non-finite equality tolerance.
    #[error("epsilon must be a finite non-negative number, got {0}")]
    InvalidEpsilon(f64),

    /// Keyboard step that would not move the strip.
    #[error("keyboard step must be a positive finite number, got {0}")]
    InvalidKeyStep(f64),
}

/// Transition durations in milliseconds, one per call site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Durations {
    /// Fallback duration. No call site uses it today.
    pub default_ms: u32,
    /// Snap back into bounds after a gesture ends.
    pub settle_ms: u32,
    /// Follow the pointer while dragging.
    pub drag_ms: u32,
    /// Wheel step that stays inside the bounds.
    pub wheel_ms: u32,
    /// Wheel step pushing past a bound (rubber band).
    pub wheel_elastic_ms: u32,
    /// Arrow/space key step.
    pub keyboard_ms: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            default_ms: 1200,
            settle_ms: 500,
            drag_ms: 300,
            wheel_ms: 250,
            wheel_elastic_ms: 200,
            keyboard_ms: 200,
        }
    }
}

/// Complete controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Leftmost offset in percent (content scrolled fully forward).
    pub min_percent: f64,
    /// Rightmost offset in percent (home position).
    pub max_percent: f64,
    /// Damping applied to overshoot past a bound (0 < e < 1, lower = stiffer).
    pub elasticity: f64,
    /// Offsets closer than this are considered equal.
    pub epsilon: f64,
    /// Percentage points moved per key press.
    pub key_step: f64,
    /// Wheel inactivity before the snap correction fires.
    pub wheel_idle_ms: u32,
    /// Per call site transition durations.
    pub durations: Durations,
    /// Timing curve shared by every transition.
    pub easing: Easing,
    /// Class marking the image children of the track.
    pub image_class: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            min_percent: -75.0,
            max_percent: 0.0,
            elasticity: 0.35,
            epsilon: 1e-4,
            key_step: 6.0,
            wheel_idle_ms: 140,
            durations: Durations::default(),
            easing: Easing::default(),
            image_class: "image".to_string(),
        }
    }
}

impl CarouselConfig {
    /// Create the stock configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the policy constants describe a usable carousel.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_percent, self.max_percent);
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        if !(self.elasticity > 0.0 && self.elasticity < 1.0) {
            return Err(ConfigError::InvalidElasticity(self.elasticity));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if !self.key_step.is_finite() || self.key_step <= 0.0 {
            return Err(ConfigError::InvalidKeyStep(self.key_step));
        }
        Ok(())
    }
}
