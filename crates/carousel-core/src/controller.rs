//! The carousel interaction controller.
//!
//! One [`Controller`] owns one track. It turns pointer, wheel and keyboard
//! input into offset changes, applies the bounds and rubber-band policy, and
//! asks its [`Host`] to animate the strip and its images.
//!
//! # Interaction Model
//!
//! - **Drag** is stateful: `Idle -> Dragging` on pointer down, back to `Idle`
//!   on pointer up, which also snaps the strip into bounds.
//! - **Wheel** is one-shot: each event moves the strip and re-arms a single
//!   debounced snap that fires after `wheel_idle_ms` of quiet.
//! - **Keyboard** is one-shot and clamped immediately; keys never overshoot.
//!
//! Wheel and keyboard input only count while the pointer hovers the track.

use crate::config::{CarouselConfig, ConfigError};
use crate::host::{Host, TimerToken};
use crate::input::{EventOutcome, Key, WheelInput};
use crate::policy::{clamp, dominant_delta, in_bounds, pointer_delta_to_percent, rubber_band};
use crate::state::{DragPhase, TrackState};
use crate::transition::{Transition, TransitionLedger, TransitionTarget};

/// Drag/wheel/keyboard controller for a single carousel track.
#[derive(Debug)]
pub struct Controller<H: Host> {
    config: CarouselConfig,
    state: TrackState,
    hovering: bool,
    pending_snap: Option<TimerToken>,
    next_token: u64,
    ledger: TransitionLedger,
    host: H,
}

impl<H: Host> Controller<H> {
    /// Create a controller at the home position.
    pub fn new(config: CarouselConfig, host: H) -> Result<Self, ConfigError> {
        Self::with_state(config, TrackState::new(), host)
    }

    /// Create a controller resuming from a previously persisted state.
    pub fn with_state(
        config: CarouselConfig,
        state: TrackState,
        host: H,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state,
            hovering: false,
            pending_snap: None,
            next_token: 0,
            ledger: TransitionLedger::new(),
            host,
        })
    }

    // ------------------------------------------------------------------
    // Core operations
    // ------------------------------------------------------------------

    /// Record `next` as the current offset and animate the strip and every
    /// image to it over `duration_ms`.
    ///
    /// Any transition already running on the same element is superseded.
    pub fn apply_offset(&mut self, next: f64, duration_ms: u32) {
        let resting = self.state.percentage;
        self.state.percentage = next;

        let now = self.host.now_ms();
        let easing = self.config.easing;
        let image_count = self.host.image_count();

        let track = Transition::track(next, duration_ms, easing);
        if let Some(interrupted) = self.ledger.start(&track, resting, now) {
            log::trace!(
                "superseding strip transition {:.3} -> {:.3}",
                interrupted.from,
                interrupted.to
            );
        }
        self.host.animate(&track);

        for index in 0..image_count {
            let image = Transition::image(index, next, duration_ms, easing);
            self.ledger.start(&image, resting, now);
            self.host.animate(&image);
        }

        self.host.persist(&self.state);
    }

    /// Animate back into `[min, max]` if the strip is outside it.
    ///
    /// Returns whether a correction was issued. Calling it again right after
    /// is a no-op.
    pub fn snap_if_out_of_bounds(&mut self) -> bool {
        let current = self.state.percentage;
        let snapped = clamp(current, self.config.min_percent, self.config.max_percent);
        if (snapped - current).abs() > self.config.epsilon {
            log::debug!("snapping strip from {current:.3}% to {snapped:.3}%");
            self.apply_offset(snapped, self.config.durations.settle_ms);
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Drag
    // ------------------------------------------------------------------

    /// Pointer or first touch went down at `pointer_x`.
    pub fn on_drag_start(&mut self, pointer_x: f64) {
        if !pointer_x.is_finite() {
            log::trace!("ignoring drag start at non-finite x");
            return;
        }
        log::debug!("drag start at x={pointer_x}");
        self.state.mouse_down_at = Some(pointer_x);
        self.host.persist(&self.state);
    }

    /// Pointer or touch released.
    pub fn on_drag_end(&mut self) {
        if self.state.mouse_down_at.take().is_some() {
            log::debug!("drag end at {:.3}%", self.state.percentage);
        }
        self.state.prev_percentage = self.state.percentage;
        self.host.persist(&self.state);
        self.snap_if_out_of_bounds();
    }

    /// Pointer or first touch moved to `pointer_x`.
    pub fn on_drag_move(&mut self, pointer_x: f64) {
        let Some(anchor) = self.state.mouse_down_at else {
            return;
        };
        if !pointer_x.is_finite() {
            return;
        }

        let delta = anchor - pointer_x;
        let pct_delta = pointer_delta_to_percent(delta, self.host.viewport_width());
        let wanted = self.state.prev_percentage + pct_delta;
        let target = self.rubber_band(wanted);

        self.apply_offset(target, self.config.durations.drag_ms);
    }

    // ------------------------------------------------------------------
    // Wheel
    // ------------------------------------------------------------------

    /// Scroll wheel or trackpad input.
    ///
    /// Inside the bounds the step is applied and the native scroll is
    /// suppressed. Past a bound the step is rubber-banded and the native
    /// scroll is left alone, so the page keeps scrolling once the strip is
    /// pinned. Every honoured event re-arms the idle snap.
    pub fn on_wheel(&mut self, input: WheelInput) -> EventOutcome {
        if !self.hovering {
            return EventOutcome::PASS;
        }
        let Some(delta) = dominant_delta(input.delta_x, input.delta_y) else {
            log::trace!("ignoring wheel event without a usable delta");
            return EventOutcome::PASS;
        };

        let pct_delta = pointer_delta_to_percent(delta, self.host.viewport_width());
        let current = self.state.percentage;
        let wanted = current + pct_delta;

        let outcome = if in_bounds(wanted, self.config.min_percent, self.config.max_percent) {
            self.apply_offset(wanted, self.config.durations.wheel_ms);
            EventOutcome::CONSUMED
        } else {
            let target = self.rubber_band(wanted);
            if (target - current).abs() > self.config.epsilon {
                self.apply_offset(target, self.config.durations.wheel_elastic_ms);
            }
            EventOutcome::PASS
        };

        self.rearm_snap();
        outcome
    }

    /// Called by the host when a scheduled snap timer fires.
    ///
    /// Stale tokens (from timers that were superseded but still fired) are
    /// ignored.
    pub fn on_snap_timer(&mut self, token: TimerToken) {
        if self.pending_snap != Some(token) {
            log::trace!("ignoring stale snap timer {token:?}");
            return;
        }
        self.pending_snap = None;
        self.snap_if_out_of_bounds();
    }

    fn rearm_snap(&mut self) {
        if let Some(previous) = self.pending_snap.take() {
            self.host.cancel_snap(previous);
        }
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.pending_snap = Some(token);
        self.host.schedule_snap(self.config.wheel_idle_ms, token);
    }

    // ------------------------------------------------------------------
    // Keyboard and hover
    // ------------------------------------------------------------------

    /// Arrow keys and space step the strip by `key_step`, clamped.
    ///
    /// Space behaves like the right arrow.
    pub fn on_key_down(&mut self, key: Key) -> EventOutcome {
        if !self.hovering {
            return EventOutcome::PASS;
        }
        let step = match key {
            Key::ArrowRight | Key::Space => -self.config.key_step,
            Key::ArrowLeft => self.config.key_step,
            Key::Other => return EventOutcome::PASS,
        };

        let next = clamp(
            self.state.percentage + step,
            self.config.min_percent,
            self.config.max_percent,
        );
        self.apply_offset(next, self.config.durations.keyboard_ms);
        EventOutcome::CONSUMED
    }

    pub fn on_pointer_enter(&mut self) {
        self.hovering = true;
    }

    pub fn on_pointer_leave(&mut self) {
        self.hovering = false;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Current logical offset in percent (the end value of the latest
    /// transition).
    pub fn offset(&self) -> f64 {
        self.state.percentage
    }

    /// Where the strip visually is at `now_ms`, following the easing curve
    /// of the transition in flight.
    pub fn rendered_offset(&self, now_ms: f64) -> f64 {
        self.ledger
            .value_at(TransitionTarget::Track, now_ms)
            .unwrap_or(self.state.percentage)
    }

    pub fn phase(&self) -> DragPhase {
        self.state.phase()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Token of the snap timer currently armed, if any.
    pub fn pending_snap(&self) -> Option<TimerToken> {
        self.pending_snap
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn ledger(&self) -> &TransitionLedger {
        &self.ledger
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn rubber_band(&self, wanted: f64) -> f64 {
        rubber_band(
            wanted,
            self.config.min_percent,
            self.config.max_percent,
            self.config.elasticity,
        )
    }
}
