//! Carousel Core - elastic image carousel controller
//!
//! This crate holds the platform-independent half of the carousel: the
//! offset state, the bounds and rubber-band policy, and the controller that
//! turns drag, wheel and keyboard input into animated offset changes.
//!
//! # Module Structure
//!
//! - `config` - Policy constants (bounds, elasticity, durations)
//! - `policy` - Pure clamp / rubber-band / delta math
//! - `state` - The persisted track state record
//! - `transition` - Transition requests, easing curves and the ledger
//! - `host` - The [`Host`] trait the platform implements
//! - `controller` - The [`Controller`] state machine
//!
//! # Usage
//!
//! ```ignore
//! use carousel_core::{CarouselConfig, Controller, Key};
//!
//! let mut carousel = Controller::new(CarouselConfig::default(), my_host)?;
//! carousel.on_pointer_enter();
//! carousel.on_key_down(Key::ArrowRight);
//! assert_eq!(carousel.offset(), -6.0);
//! ```

pub mod config;
pub mod controller;
pub mod host;
pub mod input;
pub mod policy;
pub mod state;
pub mod transition;

#[cfg(test)]
mod test_host;

pub use config::{CarouselConfig, ConfigError, Durations};
pub use controller::Controller;
pub use host::{Host, TimerToken};
pub use input::{EventOutcome, Key, WheelInput};
pub use state::{DragPhase, TrackState};
pub use transition::{
    ActiveTransition, Easing, Transition, TransitionLedger, TransitionProperty, TransitionTarget,
};

// ============================================================================
// Property-Based Tests
// ============================================================================
