//! Move-notification throttling
//!
//! A "moved" notification is only worth emitting once the reading has drifted
//! far enough from the last one a listener saw. Both step thresholds use a
//! strict comparison: a delta exactly equal to the step is suppressed.

use std::ops::RangeInclusive;

use super::polar::PolarReading;

/// Allowed angle step, in degrees
pub const ANGLE_STEP_RANGE: RangeInclusive<f64> = 1.0..=90.0;

/// Allowed distance step, in percent of full travel
pub const DISTANCE_STEP_RANGE: RangeInclusive<f64> = 1.0..=50.0;

pub const DEFAULT_ANGLE_STEP: f64 = 1.0;
pub const DEFAULT_DISTANCE_STEP: f64 = 1.0;

/// Minimum change since the last notification required to notify again.
///
/// Assignments are clamped into range, never rejected. The angle step is
/// additionally rounded to whole degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepThresholds {
    angle_step: f64,
    distance_step: f64,
}

impl StepThresholds {
    pub fn new(angle_step: f64, distance_step: f64) -> Self {
        let mut steps = Self::default();
        steps.set_angle_step(angle_step);
        steps.set_distance_step(distance_step);
        steps
    }

    pub fn angle_step(&self) -> f64 {
        self.angle_step
    }

    pub fn distance_step(&self) -> f64 {
        self.distance_step
    }

    /// Clamp to [1, 90] and round to the nearest degree (ties to even)
    pub fn set_angle_step(&mut self, value: f64) {
        self.angle_step = clamp_step(value, &ANGLE_STEP_RANGE).round_ties_even();
    }

    /// Clamp to [1, 50]
    pub fn set_distance_step(&mut self, value: f64) {
        self.distance_step = clamp_step(value, &DISTANCE_STEP_RANGE);
    }
}

impl Default for StepThresholds {
    fn default() -> Self {
        Self {
            angle_step: DEFAULT_ANGLE_STEP,
            distance_step: DEFAULT_DISTANCE_STEP,
        }
    }
}

fn clamp_step(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

/// Remembers the reading of the last emitted "moved" notification.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveThrottle {
    last_notified: PolarReading,
}

impl MoveThrottle {
    /// Forget the last notified reading (back to 0°, 0%)
    pub fn reset(&mut self) {
        self.last_notified = PolarReading::default();
    }

    /// Whether `reading` moved past either step since the last notification
    pub fn crosses_step(&self, reading: &PolarReading, steps: &StepThresholds) -> bool {
        let angle_delta = (self.last_notified.angle - reading.angle).abs();
        let distance_delta = (self.last_notified.distance - reading.distance).abs();
        angle_delta > steps.angle_step() || distance_delta > steps.distance_step()
    }

    /// Record that a notification carrying `reading` was delivered
    pub fn record(&mut self, reading: PolarReading) {
        self.last_notified = reading;
    }

    pub fn last_notified(&self) -> PolarReading {
        self.last_notified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(angle: f64, distance: f64) -> PolarReading {
        PolarReading { angle, distance }
    }

    #[test]
    fn test_default_steps() {
        let steps = StepThresholds::default();
        assert_eq!(steps.angle_step(), 1.0);
        assert_eq!(steps.distance_step(), 1.0);
    }

    #[test]
    fn test_angle_step_is_clamped_and_rounded() {
        let mut steps = StepThresholds::default();

        steps.set_angle_step(0.2);
        assert_eq!(steps.angle_step(), 1.0);

        steps.set_angle_step(500.0);
        assert_eq!(steps.angle_step(), 90.0);

        steps.set_angle_step(12.6);
        assert_eq!(steps.angle_step(), 13.0);

        steps.set_angle_step(f64::NAN);
        assert_eq!(steps.angle_step(), 1.0);
    }

    #[test]
    fn test_distance_step_is_clamped_not_rounded() {
        let mut steps = StepThresholds::default();

        steps.set_distance_step(-3.0);
        assert_eq!(steps.distance_step(), 1.0);

        steps.set_distance_step(75.0);
        assert_eq!(steps.distance_step(), 50.0);

        steps.set_distance_step(2.5);
        assert_eq!(steps.distance_step(), 2.5);
    }

    #[test]
    fn test_delta_equal_to_step_is_suppressed() {
        let steps = StepThresholds::new(5.0, 50.0);
        let throttle = MoveThrottle::default();

        assert!(!throttle.crosses_step(&reading(5.0, 0.0), &steps));
        assert!(throttle.crosses_step(&reading(5.01, 0.0), &steps));
    }

    #[test]
    fn test_either_step_triggers() {
        let steps = StepThresholds::new(10.0, 10.0);
        let mut throttle = MoveThrottle::default();
        throttle.record(reading(90.0, 40.0));

        // Neither crosses
        assert!(!throttle.crosses_step(&reading(95.0, 45.0), &steps));
        // Distance only
        assert!(throttle.crosses_step(&reading(95.0, 51.0), &steps));
        // Angle only, both directions
        assert!(throttle.crosses_step(&reading(101.0, 40.0), &steps));
        assert!(throttle.crosses_step(&reading(79.0, 40.0), &steps));
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let mut throttle = MoveThrottle::default();
        throttle.record(reading(200.0, 80.0));
        throttle.reset();
        assert_eq!(throttle.last_notified(), PolarReading::default());
    }
}
