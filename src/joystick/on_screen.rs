//! Capture-aware joystick variant
//!
//! Reports the full drag lifecycle: "captured" when the knob is grabbed,
//! "moved" with the new angle/distance whenever a step is crossed, and
//! "released" once the knob is back at center.

use std::time::Duration;
use tracing::trace;

use super::animation::ReturnAnimation;
use super::drag::{DragPhase, JoystickSnapshot, JoystickState, MoveOutcome};
use super::listeners::{ListenerId, Listeners};
use super::polar::{Point, REFERENCE_RADIUS};
use super::{JoystickControl, SnapshotPublisher};

/// Payload of the "moved" notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickMoved {
    pub angle: f64,
    pub distance: f64,
}

/// On-screen joystick with captured/moved/released notifications
#[derive(Debug)]
pub struct OnScreenJoystick {
    state: JoystickState,
    moved: Listeners<JoystickMoved>,
    captured: Listeners<()>,
    released: Listeners<()>,
    changes: SnapshotPublisher,
}

impl OnScreenJoystick {
    pub fn new(radius: f64) -> Self {
        Self::from_state(JoystickState::new(radius))
    }

    pub fn with_animation(radius: f64, animation: Box<dyn ReturnAnimation>) -> Self {
        Self::from_state(JoystickState::with_animation(radius, animation))
    }

    fn from_state(state: JoystickState) -> Self {
        Self {
            state,
            moved: Listeners::new(),
            captured: Listeners::new(),
            released: Listeners::new(),
            changes: SnapshotPublisher::default(),
        }
    }

    pub fn angle(&self) -> f64 {
        self.state.angle()
    }

    pub fn distance(&self) -> f64 {
        self.state.distance()
    }

    pub fn angle_step(&self) -> f64 {
        self.state.angle_step()
    }

    /// Clamped to [1, 90] and rounded to whole degrees
    pub fn set_angle_step(&mut self, value: f64) {
        self.state.set_angle_step(value);
    }

    pub fn distance_step(&self) -> f64 {
        self.state.distance_step()
    }

    /// Clamped to [1, 50]
    pub fn set_distance_step(&mut self, value: f64) {
        self.state.set_distance_step(value);
    }

    /// Listen for step-crossing moves
    pub fn on_moved<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&JoystickMoved) + Send + 'static,
    {
        self.moved.subscribe(listener)
    }

    /// Listen for the knob being grabbed
    pub fn on_captured<F>(&mut self, mut listener: F) -> ListenerId
    where
        F: FnMut() + Send + 'static,
    {
        self.captured.subscribe(move |_| listener())
    }

    /// Listen for the knob settling back at center after release
    pub fn on_released<F>(&mut self, mut listener: F) -> ListenerId
    where
        F: FnMut() + Send + 'static,
    {
        self.released.subscribe(move |_| listener())
    }

    /// Listen for every visible change (unthrottled)
    pub fn on_state_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&JoystickSnapshot) + Send + 'static,
    {
        self.changes.listeners().subscribe(listener)
    }

    pub fn remove_moved_listener(&mut self, id: ListenerId) -> bool {
        self.moved.unsubscribe(id)
    }

    pub fn remove_captured_listener(&mut self, id: ListenerId) -> bool {
        self.captured.unsubscribe(id)
    }

    pub fn remove_released_listener(&mut self, id: ListenerId) -> bool {
        self.released.unsubscribe(id)
    }

    pub fn remove_state_listener(&mut self, id: ListenerId) -> bool {
        self.changes.listeners().unsubscribe(id)
    }

    fn finish_release(&mut self) {
        self.changes.publish(&self.state);
        self.released.emit(&());
    }
}

impl Default for OnScreenJoystick {
    fn default() -> Self {
        Self::new(REFERENCE_RADIUS)
    }
}

impl JoystickControl for OnScreenJoystick {
    fn pointer_down(&mut self, at: Point) {
        self.state.capture(at);
        self.captured.emit(&());
        self.changes.publish(&self.state);
    }

    fn pointer_move(&mut self, at: Point) {
        let MoveOutcome::Moved {
            reading,
            crossed_step,
        } = self.state.track(at)
        else {
            return;
        };

        self.changes.publish(&self.state);

        if !crossed_step || self.moved.is_empty() {
            return;
        }

        trace!("Moved: {:.1}° / {:.0}%", reading.angle, reading.distance);
        self.moved.emit(&JoystickMoved {
            angle: reading.angle,
            distance: reading.distance,
        });
        self.state.mark_notified();
    }

    fn pointer_up(&mut self) {
        if self.state.release() {
            self.changes.publish(&self.state);
        }
    }

    fn advance(&mut self, dt: Duration) {
        if self.state.advance(dt) {
            self.finish_release();
        } else if self.state.phase() == DragPhase::Releasing {
            self.changes.publish(&self.state);
        }
    }

    fn complete_return(&mut self) {
        if self.state.finish_return() {
            self.finish_release();
        }
    }

    fn state(&self) -> &JoystickState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut JoystickState {
        &mut self.state
    }
}
