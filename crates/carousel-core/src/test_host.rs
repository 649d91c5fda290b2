//! Recording [`Host`] used by the controller tests.

use crate::host::{Host, TimerToken};
use crate::state::TrackState;
use crate::transition::{Transition, TransitionTarget};

#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub viewport: f64,
    pub now: f64,
    pub images: usize,
    pub animations: Vec<Transition>,
    pub scheduled: Vec<(u32, TimerToken)>,
    pub cancelled: Vec<TimerToken>,
    pub persisted: Vec<TrackState>,
}

impl RecordingHost {
    pub fn new(viewport: f64, images: usize) -> Self {
        Self {
            viewport,
            images,
            ..Self::default()
        }
    }

    pub fn track_animations(&self) -> impl Iterator<Item = &Transition> {
        self.animations
            .iter()
            .filter(|t| t.target == TransitionTarget::Track)
    }

    pub fn last_track(&self) -> Option<&Transition> {
        self.track_animations().last()
    }
}

impl Host for RecordingHost {
    fn viewport_width(&self) -> f64 {
        self.viewport
    }

    fn now_ms(&self) -> f64 {
        self.now
    }

    fn image_count(&self) -> usize {
        self.images
    }

    fn animate(&mut self, transition: &Transition) {
        self.animations.push(transition.clone());
    }

    fn schedule_snap(&mut self, delay_ms: u32, token: TimerToken) {
        self.scheduled.push((delay_ms, token));
    }

    fn cancel_snap(&mut self, token: TimerToken) {
        self.cancelled.push(token);
    }

    fn persist(&mut self, state: &TrackState) {
        self.persisted.push(*state);
    }
}
