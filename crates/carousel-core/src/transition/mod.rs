//! Timed property transitions issued by the controller.
//!
//! Every offset change produces one transition for the strip and one per
//! image. The host renders them (in the browser, `Element.animate` with fill
//! mode "forwards"); the controller keeps a [`TransitionLedger`] so it knows
//! which transition currently owns each target.
//!
//! # Targets and Properties
//!
//! | Target           | Property          | CSS value                  |
//! |------------------|-------------------|----------------------------|
//! | `Track`          | `transform`       | `translate(<p>%, -50%)`    |
//! | `Image(index)`   | `object-position` | `<100 + p>% center`        |

mod easing;
mod ledger;

pub use easing::Easing;
pub use ledger::{ActiveTransition, TransitionLedger};

/// Element a transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransitionTarget {
    /// The scrolling strip.
    Track,
    /// The n-th image inside the strip, in document order.
    Image(usize),
}

/// Property value a transition ends at, in strip offset percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionProperty {
    /// Horizontal translation of the strip.
    Translate { percent: f64 },
    /// Visible crop of an image, derived from the strip offset.
    ObjectPosition { percent: f64 },
}

impl TransitionProperty {
    /// Strip offset this property was derived from.
    pub fn offset(&self) -> f64 {
        match *self {
            TransitionProperty::Translate { percent }
            | TransitionProperty::ObjectPosition { percent } => percent,
        }
    }

    /// CSS property name, in keyframe (camelCase) form.
    pub fn css_property(&self) -> &'static str {
        match self {
            TransitionProperty::Translate { .. } => "transform",
            TransitionProperty::ObjectPosition { .. } => "objectPosition",
        }
    }

    /// CSS value at the end of the transition.
    pub fn css_value(&self) -> String {
        match *self {
            TransitionProperty::Translate { percent } => format!("translate({percent}%, -50%)"),
            TransitionProperty::ObjectPosition { percent } => {
                format!("{}% center", 100.0 + percent)
            }
        }
    }
}

/// A request to animate one property of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub target: TransitionTarget,
    pub property: TransitionProperty,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl Transition {
    /// Strip translation to `percent`.
    pub fn track(percent: f64, duration_ms: u32, easing: Easing) -> Self {
        Self {
            target: TransitionTarget::Track,
            property: TransitionProperty::Translate { percent },
            duration_ms,
            easing,
        }
    }

    /// Crop position of image `index` for strip offset `percent`.
    pub fn image(index: usize, percent: f64, duration_ms: u32, easing: Easing) -> Self {
        Self {
            target: TransitionTarget::Image(index),
            property: TransitionProperty::ObjectPosition { percent },
            duration_ms,
            easing,
        }
    }
}
