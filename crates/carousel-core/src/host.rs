//! The platform seam.
//!
//! The controller never touches a DOM, a clock or a timer directly. A
//! [`Host`] supplies those capabilities; the browser binding implements it on
//! top of `Element.animate` and `setTimeout`, tests implement it with a
//! recording fake.

use crate::state::TrackState;
use crate::transition::Transition;

/// Identifies one scheduled snap correction.
///
/// Tokens increase monotonically per controller. Only the most recently
/// issued token is honoured when its timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

/// Capabilities the controller consumes from its environment.
pub trait Host {
    /// Width of the viewport in pixels. Drag and wheel travel are measured
    /// against half of it.
    fn viewport_width(&self) -> f64;

    /// Monotonic-enough wall clock in milliseconds.
    fn now_ms(&self) -> f64;

    /// Number of image children currently inside the track.
    fn image_count(&self) -> usize;

    /// Start `transition`, replacing any transition already running on the
    /// same target. The element must be left at the end value.
    fn animate(&mut self, transition: &Transition);

    /// Arrange for [`Controller::on_snap_timer`](crate::Controller::on_snap_timer)
    /// to be called with `token` after `delay_ms`.
    fn schedule_snap(&mut self, delay_ms: u32, token: TimerToken);

    /// Best-effort cancellation of a previously scheduled snap.
    fn cancel_snap(&mut self, token: TimerToken);

    /// Mirror the state record somewhere inspectable. Optional.
    fn persist(&mut self, _state: &TrackState) {}
}
