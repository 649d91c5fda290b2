//! Bookkeeping for in-flight transitions.
//!
//! A new transition on a target replaces the previous one outright: there is
//! no queue and no blending. The replaced entry is handed back so callers can
//! log or inspect what was interrupted.

use super::{Easing, Transition, TransitionTarget};
use std::collections::BTreeMap;

/// A transition the host is rendering (or has finished rendering).
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTransition {
    /// Offset the element was visually at when the transition started.
    pub from: f64,
    /// Offset the element ends at.
    pub to: f64,
    pub started_at_ms: f64,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl ActiveTransition {
    /// Visual offset at `now_ms`. Holds the end value after completion.
    pub fn value_at(&self, now_ms: f64) -> f64 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let progress = (now_ms - self.started_at_ms) / f64::from(self.duration_ms);
        self.from + (self.to - self.from) * self.easing.evaluate(progress)
    }

    /// Whether the transition is still moving at `now_ms`.
    pub fn is_running(&self, now_ms: f64) -> bool {
        now_ms < self.started_at_ms + f64::from(self.duration_ms)
    }
}

/// Latest transition per target.
#[derive(Debug, Clone, Default)]
pub struct TransitionLedger {
    entries: BTreeMap<TransitionTarget, ActiveTransition>,
}

impl TransitionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `transition` as the owner of its target, starting at `now_ms`.
    ///
    /// The start value is wherever the previous transition had visually
    /// reached, or `resting` if the target never moved. Returns the
    /// superseded entry if it was still running.
    pub fn start(
        &mut self,
        transition: &Transition,
        resting: f64,
        now_ms: f64,
    ) -> Option<ActiveTransition> {
        let from = self
            .value_at(transition.target, now_ms)
            .unwrap_or(resting);
        let entry = ActiveTransition {
            from,
            to: transition.property.offset(),
            started_at_ms: now_ms,
            duration_ms: transition.duration_ms,
            easing: transition.easing,
        };
        self.entries
            .insert(transition.target, entry)
            .filter(|previous| previous.is_running(now_ms))
    }

    /// Current visual offset of `target`, if it was ever animated.
    pub fn value_at(&self, target: TransitionTarget, now_ms: f64) -> Option<f64> {
        self.entries.get(&target).map(|entry| entry.value_at(now_ms))
    }

    /// Latest transition recorded for `target`.
    pub fn get(&self, target: TransitionTarget) -> Option<&ActiveTransition> {
        self.entries.get(&target)
    }

    /// Number of targets that have been animated.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
