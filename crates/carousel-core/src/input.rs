//! Input events as the controller sees them.
//!
//! Browser events are reduced to these small values by the binding layer:
//! touch events to their first contact point, keyboard events to a [`Key`].

/// Wheel deltas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
}

impl WheelInput {
    pub fn new(delta_x: f64, delta_y: f64) -> Self {
        Self { delta_x, delta_y }
    }
}

/// Keys the carousel distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    /// Anything else; always passed through.
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            " " => Key::Space,
            _ => Key::Other,
        }
    }
}

/// What the host should do with the native event after the controller ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Suppress the browser's default action (page scroll).
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const PASS: EventOutcome = EventOutcome {
        prevent_default: false,
    };
    pub const CONSUMED: EventOutcome = EventOutcome {
        prevent_default: true,
    };
}
