//! Capture/release state machine shared by both joystick variants
//!
//! `Idle -> Captured` on pointer-down, `Captured -> Captured` on every move,
//! `Captured -> Releasing` on pointer-up (return animation starts) and
//! `Releasing -> Idle` once the animation completes, which is the only place
//! angle and distance are forced back to zero.

use std::fmt;
use std::time::Duration;
use tracing::debug;

use super::animation::{GlideToCenter, ReturnAnimation};
use super::polar::{to_polar, OutOfTrack, Offset, Point, PolarReading, REFERENCE_RADIUS};
use super::throttle::{MoveThrottle, StepThresholds};

/// Where the knob is in its capture lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Captured,
    /// Released, gliding back to center
    Releasing,
}

/// Everything a display or data binding needs to render the joystick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JoystickSnapshot {
    pub angle: f64,
    pub distance: f64,
    pub knob_offset: Offset,
    pub phase: DragPhase,
}

/// Result of feeding a pointer move to the state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// Not captured, the move was dropped
    Ignored,
    /// Past the track edge, nothing changed
    OutOfTrack(OutOfTrack),
    /// State updated; `crossed_step` tells whether a notification is due
    Moved {
        reading: PolarReading,
        crossed_step: bool,
    },
}

/// Per-widget joystick state.
///
/// Owns the reading, the drag origin, the notification throttle and the
/// return animation. Transitions are driven by the widget variants, which
/// add their own notification contracts on top.
pub struct JoystickState {
    radius: f64,
    steps: StepThresholds,
    throttle: MoveThrottle,
    phase: DragPhase,
    origin: Point,
    reading: PolarReading,
    knob_offset: Offset,
    animation: Box<dyn ReturnAnimation>,
}

impl JoystickState {
    /// State for a track of `radius` layout units with the default glide.
    ///
    /// Non-positive or non-finite radii fall back to [`REFERENCE_RADIUS`].
    pub fn new(radius: f64) -> Self {
        Self::with_animation(radius, Box::new(GlideToCenter::default()))
    }

    pub fn with_animation(radius: f64, animation: Box<dyn ReturnAnimation>) -> Self {
        let radius = if radius.is_finite() && radius > 0.0 {
            radius
        } else {
            debug!("Invalid track radius {}, using {}", radius, REFERENCE_RADIUS);
            REFERENCE_RADIUS
        };

        Self {
            radius,
            steps: StepThresholds::default(),
            throttle: MoveThrottle::default(),
            phase: DragPhase::Idle,
            origin: Point::ORIGIN,
            reading: PolarReading::default(),
            knob_offset: Offset::ZERO,
            animation,
        }
    }

    /// Current angle in degrees, [0, 360), 0 = up, clockwise
    pub fn angle(&self) -> f64 {
        self.reading.angle
    }

    /// Current distance in percent of full travel, [0, 100]
    pub fn distance(&self) -> f64 {
        self.reading.distance
    }

    pub fn reading(&self) -> PolarReading {
        self.reading
    }

    /// Knob displacement from the drag origin, in layout units
    pub fn knob_offset(&self) -> Offset {
        self.knob_offset
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_captured(&self) -> bool {
        self.phase == DragPhase::Captured
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn steps(&self) -> StepThresholds {
        self.steps
    }

    pub fn angle_step(&self) -> f64 {
        self.steps.angle_step()
    }

    pub fn distance_step(&self) -> f64 {
        self.steps.distance_step()
    }

    pub fn set_angle_step(&mut self, value: f64) {
        self.steps.set_angle_step(value);
    }

    pub fn set_distance_step(&mut self, value: f64) {
        self.steps.set_distance_step(value);
    }

    /// Reading carried by the last "moved" notification
    pub fn last_notified(&self) -> PolarReading {
        self.throttle.last_notified()
    }

    /// Swap the return animation. A glide in flight is stopped first and
    /// the new animation resumes from the current knob offset.
    pub fn set_animation(&mut self, animation: Box<dyn ReturnAnimation>) {
        let was_running = self.animation.is_running();
        self.animation.stop();
        self.animation = animation;
        if was_running {
            self.animation.start(self.knob_offset);
        }
    }

    pub fn snapshot(&self) -> JoystickSnapshot {
        JoystickSnapshot {
            angle: self.reading.angle,
            distance: self.reading.distance,
            knob_offset: self.knob_offset,
            phase: self.phase,
        }
    }

    /// Pointer went down on the knob at `at`
    pub(crate) fn capture(&mut self, at: Point) {
        self.origin = at;
        self.throttle.reset();
        self.animation.stop();
        self.phase = DragPhase::Captured;
        debug!("Joystick captured at ({:.1}, {:.1})", at.x, at.y);
    }

    /// Pointer moved to `at`
    pub(crate) fn track(&mut self, at: Point) -> MoveOutcome {
        if self.phase != DragPhase::Captured {
            return MoveOutcome::Ignored;
        }

        let offset = at - self.origin;
        match to_polar(offset, self.radius) {
            Ok(reading) => {
                self.reading = reading;
                self.knob_offset = offset;
                MoveOutcome::Moved {
                    reading,
                    crossed_step: self.throttle.crosses_step(&reading, &self.steps),
                }
            }
            Err(out_of_track) => {
                debug!("Discarding move: {}", out_of_track);
                MoveOutcome::OutOfTrack(out_of_track)
            }
        }
    }

    /// A "moved" notification for the current reading was delivered
    pub(crate) fn mark_notified(&mut self) {
        self.throttle.record(self.reading);
    }

    /// Pointer went up. Returns false when nothing was captured.
    pub(crate) fn release(&mut self) -> bool {
        if self.phase != DragPhase::Captured {
            return false;
        }
        self.phase = DragPhase::Releasing;
        self.animation.start(self.knob_offset);
        debug!(
            "Joystick released at {:.0}° / {:.0}%, returning to center",
            self.reading.angle, self.reading.distance
        );
        true
    }

    /// Step the return animation. Returns true when it just completed.
    pub(crate) fn advance(&mut self, dt: Duration) -> bool {
        if self.phase != DragPhase::Releasing {
            return false;
        }
        match self.animation.advance(dt) {
            Some(frame) if frame.finished => self.finish_return(),
            Some(frame) => {
                self.knob_offset = frame.offset;
                false
            }
            // Animation stopped underneath us, treat as completed
            None => self.finish_return(),
        }
    }

    /// Return animation completed. Returns false outside `Releasing`.
    pub(crate) fn finish_return(&mut self) -> bool {
        if self.phase != DragPhase::Releasing {
            return false;
        }
        self.animation.stop();
        self.reading = PolarReading::default();
        self.knob_offset = Offset::ZERO;
        self.throttle.reset();
        self.phase = DragPhase::Idle;
        debug!("Joystick back at center");
        true
    }
}

impl Default for JoystickState {
    fn default() -> Self {
        Self::new(REFERENCE_RADIUS)
    }
}

impl fmt::Debug for JoystickState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoystickState")
            .field("radius", &self.radius)
            .field("steps", &self.steps)
            .field("phase", &self.phase)
            .field("origin", &self.origin)
            .field("reading", &self.reading)
            .field("knob_offset", &self.knob_offset)
            .field("last_notified", &self.throttle.last_notified())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joystick::animation::Easing;

    fn immediate_state() -> JoystickState {
        JoystickState::with_animation(REFERENCE_RADIUS, Box::new(GlideToCenter::immediate()))
    }

    #[test]
    fn test_move_without_capture_is_ignored() {
        let mut state = immediate_state();
        assert_eq!(state.track(Point::new(50.0, 0.0)), MoveOutcome::Ignored);
        assert_eq!(state.snapshot(), JoystickSnapshot::default());
    }

    #[test]
    fn test_move_is_relative_to_capture_origin() {
        let mut state = immediate_state();
        state.capture(Point::new(100.0, 100.0));

        let outcome = state.track(Point::new(100.0, 32.5));
        match outcome {
            MoveOutcome::Moved { reading, crossed_step } => {
                assert_eq!(reading.distance, 50.0);
                assert!(reading.angle.abs() < 1e-9);
                assert!(crossed_step);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(state.knob_offset(), Offset::new(0.0, -67.5));
    }

    #[test]
    fn test_out_of_track_leaves_state_unchanged() {
        let mut state = immediate_state();
        state.capture(Point::ORIGIN);
        state.track(Point::new(27.0, 0.0));
        let before = state.snapshot();

        let outcome = state.track(Point::new(136.0, 0.0));
        assert!(matches!(outcome, MoveOutcome::OutOfTrack(_)));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_release_then_finish_zeroes_everything() {
        let mut state = immediate_state();
        state.capture(Point::ORIGIN);
        state.track(Point::new(0.0, 100.0));
        state.mark_notified();

        assert!(state.release());
        assert_eq!(state.phase(), DragPhase::Releasing);
        // Values survive until the glide completes
        assert!(state.distance() > 0.0);

        assert!(state.advance(Duration::from_millis(16)));
        assert_eq!(state.phase(), DragPhase::Idle);
        assert_eq!(state.reading(), PolarReading::default());
        assert_eq!(state.knob_offset(), Offset::ZERO);
        assert_eq!(state.last_notified(), PolarReading::default());
    }

    #[test]
    fn test_release_without_capture_is_ignored() {
        let mut state = immediate_state();
        assert!(!state.release());
        assert!(!state.finish_return());
        assert!(!state.advance(Duration::from_millis(16)));
    }

    #[test]
    fn test_glide_moves_knob_towards_center() {
        let mut state = JoystickState::with_animation(
            REFERENCE_RADIUS,
            Box::new(GlideToCenter::new(Duration::from_millis(100), Easing::Linear)),
        );
        state.capture(Point::ORIGIN);
        state.track(Point::new(100.0, 0.0));
        state.release();

        assert!(!state.advance(Duration::from_millis(50)));
        assert!((state.knob_offset().dx - 50.0).abs() < 1e-9);
        assert_eq!(state.phase(), DragPhase::Releasing);

        assert!(state.advance(Duration::from_millis(50)));
        assert_eq!(state.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_recapture_during_glide_cancels_completion() {
        let mut state = JoystickState::new(REFERENCE_RADIUS);
        state.capture(Point::ORIGIN);
        state.track(Point::new(60.0, 0.0));
        state.release();

        state.capture(Point::new(5.0, 5.0));
        assert!(state.is_captured());
        // A late completion must not zero the new drag
        assert!(!state.finish_return());
        assert!(!state.advance(Duration::from_secs(1)));
        assert!(state.is_captured());
    }

    #[test]
    fn test_invalid_radius_falls_back() {
        assert_eq!(JoystickState::new(0.0).radius(), REFERENCE_RADIUS);
        assert_eq!(JoystickState::new(f64::NAN).radius(), REFERENCE_RADIUS);
        assert_eq!(JoystickState::new(80.0).radius(), 80.0);
    }
}
