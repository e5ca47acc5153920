//! Return-to-center animation
//!
//! After release the knob glides from its last offset back to the center.
//! The joystick only needs a narrow contract from the animation: start it,
//! stop it, and learn when it finishes. Hosts advance it once per frame.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::polar::Offset;

/// Easing curve applied to the glide back to center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] to eased progress in [0, 1]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            // Cubic ease-out: fast start, soft landing at center
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Knob offset produced by one animation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub offset: Offset,
    pub finished: bool,
}

/// Animation controller driving the knob back to center.
pub trait ReturnAnimation: Send {
    /// Begin gliding from `from` towards the center, restarting if running
    fn start(&mut self, from: Offset);

    /// Abort the animation. No-op when idle.
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Advance by `dt`. Returns `None` when not running.
    fn advance(&mut self, dt: Duration) -> Option<AnimationFrame>;
}

pub const DEFAULT_RETURN_DURATION: Duration = Duration::from_millis(200);

/// Time-based glide with an easing curve
#[derive(Debug, Clone)]
pub struct GlideToCenter {
    duration: Duration,
    easing: Easing,
    from: Offset,
    elapsed: Duration,
    running: bool,
}

impl GlideToCenter {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            from: Offset::ZERO,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    /// Glide that lands on the first `advance`
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Easing::Linear)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Change timing; a running glide keeps its progress
    pub fn set_timing(&mut self, duration: Duration, easing: Easing) {
        self.duration = duration;
        self.easing = easing;
    }

    fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

impl Default for GlideToCenter {
    fn default() -> Self {
        Self::new(DEFAULT_RETURN_DURATION, Easing::default())
    }
}

impl ReturnAnimation for GlideToCenter {
    fn start(&mut self, from: Offset) {
        self.from = from;
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn advance(&mut self, dt: Duration) -> Option<AnimationFrame> {
        if !self.running {
            return None;
        }

        self.elapsed += dt;
        let t = self.progress();
        if t >= 1.0 {
            self.running = false;
            return Some(AnimationFrame {
                offset: Offset::ZERO,
                finished: true,
            });
        }

        Some(AnimationFrame {
            offset: self.from.scaled(1.0 - self.easing.apply(t)),
            finished: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0); // Clamped
        }
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
    }

    #[test]
    fn test_glide_reaches_center() {
        let mut glide = GlideToCenter::new(Duration::from_millis(100), Easing::Linear);
        assert!(glide.advance(Duration::from_millis(10)).is_none());

        glide.start(Offset::new(100.0, -50.0));
        assert!(glide.is_running());

        let frame = glide.advance(Duration::from_millis(50)).unwrap();
        assert!(!frame.finished);
        assert!((frame.offset.dx - 50.0).abs() < 1e-9);
        assert!((frame.offset.dy + 25.0).abs() < 1e-9);

        let frame = glide.advance(Duration::from_millis(60)).unwrap();
        assert!(frame.finished);
        assert_eq!(frame.offset, Offset::ZERO);
        assert!(!glide.is_running());
    }

    #[test]
    fn test_immediate_glide_finishes_on_first_advance() {
        let mut glide = GlideToCenter::immediate();
        glide.start(Offset::new(10.0, 10.0));
        let frame = glide.advance(Duration::ZERO).unwrap();
        assert!(frame.finished);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut glide = GlideToCenter::default();
        glide.stop();
        glide.start(Offset::new(1.0, 0.0));
        glide.stop();
        glide.stop();
        assert!(!glide.is_running());
        assert!(glide.advance(Duration::from_secs(1)).is_none());
    }
}
