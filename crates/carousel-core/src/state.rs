//! The controller's persisted state record.
//!
//! Three numbers describe the strip between events: the current offset, the
//! drag anchor and the baseline offset the next drag starts from. The host
//! mirrors them into string attributes on the track element (`data-*`), which
//! is also where a freshly attached controller reads them back from.

use serde::{Deserialize, Serialize};

/// Attribute key for the current offset.
pub const ATTR_PERCENTAGE: &str = "percentage";
/// Attribute key for the drag anchor (`0` while idle).
pub const ATTR_MOUSE_DOWN_AT: &str = "mouseDownAt";
/// Attribute key for the drag baseline.
pub const ATTR_PREV_PERCENTAGE: &str = "prevPercentage";

/// Interaction phase of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// Offset and drag bookkeeping for one track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackState {
    /// Current horizontal offset in percent of the strip width.
    pub percentage: f64,
    /// Pointer x where the active drag began, `None` when idle.
    pub mouse_down_at: Option<f64>,
    /// Offset captured when the last drag ended.
    pub prev_percentage: f64,
}

impl TrackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        if self.mouse_down_at.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    /// Rebuild state from attribute values read off the track element.
    ///
    /// Missing or malformed values count as `0`. A restored drag anchor is
    /// dropped: no pointer can still be held when a controller attaches.
    pub fn from_attributes(percentage: Option<&str>, prev_percentage: Option<&str>) -> Self {
        Self {
            percentage: parse_attribute(percentage),
            mouse_down_at: None,
            prev_percentage: parse_attribute(prev_percentage),
        }
    }

    /// Attribute key/value pairs to mirror onto the track element.
    pub fn to_attributes(&self) -> [(&'static str, String); 3] {
        [
            (ATTR_PERCENTAGE, self.percentage.to_string()),
            (
                ATTR_MOUSE_DOWN_AT,
                self.mouse_down_at.unwrap_or(0.0).to_string(),
            ),
            (ATTR_PREV_PERCENTAGE, self.prev_percentage.to_string()),
        ]
    }
}

/// Parse a numeric attribute, defaulting to `0` when absent or unusable.
pub fn parse_attribute(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
