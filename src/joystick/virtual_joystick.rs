//! Passive-report joystick variant
//!
//! Exposes angle and distance as readable state and raises a single
//! "stick moved" notification. Listeners receive the joystick state and
//! read whatever they need from it.

use std::time::Duration;
use tracing::trace;

use super::animation::ReturnAnimation;
use super::drag::{DragPhase, JoystickSnapshot, JoystickState, MoveOutcome};
use super::listeners::{ListenerId, Listeners};
use super::polar::{Point, REFERENCE_RADIUS};
use super::{JoystickControl, SnapshotPublisher};

/// Virtual joystick with a single throttled "stick moved" notification
#[derive(Debug)]
pub struct VirtualJoystick {
    state: JoystickState,
    stick_moved: Listeners<JoystickState>,
    changes: SnapshotPublisher,
}

impl VirtualJoystick {
    pub fn new(radius: f64) -> Self {
        Self::from_state(JoystickState::new(radius))
    }

    pub fn with_animation(radius: f64, animation: Box<dyn ReturnAnimation>) -> Self {
        Self::from_state(JoystickState::with_animation(radius, animation))
    }

    fn from_state(state: JoystickState) -> Self {
        Self {
            state,
            stick_moved: Listeners::new(),
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

    pub fn set_angle_step(&mut self, value: f64) {
        self.state.set_angle_step(value);
    }

    pub fn distance_step(&self) -> f64 {
        self.state.distance_step()
    }

    pub fn set_distance_step(&mut self, value: f64) {
        self.state.set_distance_step(value);
    }

    /// Listen for step-crossing moves. The listener reads angle and
    /// distance from the state it is handed.
    pub fn on_stick_moved<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&JoystickState) + Send + 'static,
    {
        self.stick_moved.subscribe(listener)
    }

    pub fn remove_stick_moved_listener(&mut self, id: ListenerId) -> bool {
        self.stick_moved.unsubscribe(id)
    }

    /// Listen for every visible change (unthrottled)
    pub fn on_state_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&JoystickSnapshot) + Send + 'static,
    {
        self.changes.listeners().subscribe(listener)
    }

    pub fn remove_state_listener(&mut self, id: ListenerId) -> bool {
        self.changes.listeners().unsubscribe(id)
    }
}

impl Default for VirtualJoystick {
    fn default() -> Self {
        Self::new(REFERENCE_RADIUS)
    }
}

impl JoystickControl for VirtualJoystick {
    fn pointer_down(&mut self, at: Point) {
        self.state.capture(at);
        self.changes.publish(&self.state);
    }

    fn pointer_move(&mut self, at: Point) {
        let MoveOutcome::Moved { crossed_step, .. } = self.state.track(at) else {
            return;
        };

        self.changes.publish(&self.state);

        if !crossed_step || self.stick_moved.is_empty() {
            return;
        }

        trace!(
            "Stick moved: {:.1}° / {:.0}%",
            self.state.angle(),
            self.state.distance()
        );
        self.stick_moved.emit(&self.state);
        self.state.mark_notified();
    }

    fn pointer_up(&mut self) {
        if self.state.release() {
            self.changes.publish(&self.state);
        }
    }

    fn advance(&mut self, dt: Duration) {
        if self.state.advance(dt) || self.state.phase() == DragPhase::Releasing {
            self.changes.publish(&self.state);
        }
    }

    fn complete_return(&mut self) {
        if self.state.finish_return() {
            self.changes.publish(&self.state);
        }
    }

    fn state(&self) -> &JoystickState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut JoystickState {
        &mut self.state
    }
}
