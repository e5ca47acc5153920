//! On-screen virtual joystick core
//!
//! Framework-independent logic behind the joystick widget: the polar mapping
//! from knob displacement to angle/distance, the step throttle for "moved"
//! notifications, and the capture/release state machine with its
//! return-to-center animation.
//!
//! Two variants share the core:
//! - [`VirtualJoystick`]: passive report, a single "stick moved" notification
//!   whose listeners read the state themselves.
//! - [`OnScreenJoystick`]: capture-aware, "captured", "moved" (with payload)
//!   and "released" notifications.
//!
//! Hosts feed pointer events through [`JoystickControl`] and call
//! [`JoystickControl::advance`] once per frame while the knob glides back.

pub mod animation;
pub mod drag;
pub mod listeners;
pub mod on_screen;
pub mod polar;
pub mod throttle;
pub mod virtual_joystick;


use std::time::Duration;

pub use animation::{Easing, GlideToCenter, ReturnAnimation};
pub use drag::{DragPhase, JoystickSnapshot, JoystickState};
pub use listeners::{ListenerId, Listeners};
pub use on_screen::{JoystickMoved, OnScreenJoystick};
pub use polar::{Offset, Point, PolarReading, REFERENCE_RADIUS};
pub use throttle::StepThresholds;
pub use virtual_joystick::VirtualJoystick;

/// Pointer-driven joystick as seen by a host window
pub trait JoystickControl {
    /// Pointer pressed on the knob. `at` is relative to the widget's
    /// fixed reference point, in layout units.
    fn pointer_down(&mut self, at: Point);

    /// Pointer moved. Ignored unless captured.
    fn pointer_move(&mut self, at: Point);

    /// Pointer released. Starts the glide back to center.
    fn pointer_up(&mut self);

    /// Advance the return animation by one frame
    fn advance(&mut self, dt: Duration);

    /// Signal that an externally driven return animation finished
    fn complete_return(&mut self);

    fn state(&self) -> &JoystickState;

    fn state_mut(&mut self) -> &mut JoystickState;
}

/// Unthrottled change feed used for display and data binding.
///
/// Emits a [`JoystickSnapshot`] whenever angle, distance, knob offset or
/// phase differ from the last published snapshot.
#[derive(Debug, Default)]
pub(crate) struct SnapshotPublisher {
    last: JoystickSnapshot,
    listeners: Listeners<JoystickSnapshot>,
}

impl SnapshotPublisher {
    pub(crate) fn listeners(&mut self) -> &mut Listeners<JoystickSnapshot> {
        &mut self.listeners
    }

    pub(crate) fn publish(&mut self, state: &JoystickState) {
        let snapshot = state.snapshot();
        if snapshot != self.last {
            self.last = snapshot;
            self.listeners.emit(&snapshot);
        }
    }
}
