//! On-screen joystick widget
//!
//! A draggable knob inside a circular track that reports direction as an
//! angle (0-360°, clockwise from up) and deflection as a distance
//! percentage (0-100), with throttled "moved" notifications and a glide
//! back to center on release.

pub mod config;
pub mod joystick;
pub mod paths;
pub mod ui;

pub use config::{ConfigError, JoystickConfig, JoystickVariant};
pub use joystick::{JoystickControl, OnScreenJoystick, VirtualJoystick};
