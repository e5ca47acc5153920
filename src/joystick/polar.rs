//! Polar mapping from knob displacement to joystick readings.
//!
//! Displacements use screen convention: `dy` grows downward. The reported
//! angle starts at 0° pointing up and grows clockwise, so right is 90°,
//! down is 180° and left is 270°. Distance is the displacement length as a
//! percentage of the track radius, rounded to an integer.

use std::f64::consts::PI;
use std::ops::{Add, Sub};

/// Knob travel radius of the reference layout, in layout units.
pub const REFERENCE_RADIUS: f64 = 135.0;

/// Largest distance a reading may report.
pub const MAX_DISTANCE: f64 = 100.0;

/// A pointer position relative to the widget's fixed reference point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Point) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

/// Displacement of the knob from the point where the drag began.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Euclidean length of the displacement
    pub fn length(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }

    /// Scale both components by `factor`
    pub fn scaled(&self, factor: f64) -> Offset {
        Offset::new(self.dx * factor, self.dy * factor)
    }
}

/// Angle/distance pair reported by the joystick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarReading {
    /// Degrees in [0, 360), 0 = up, clockwise
    pub angle: f64,
    /// Percentage of full knob travel in [0, 100]
    pub distance: f64,
}

/// The displacement reaches past the track edge; the move must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("displacement maps to distance {distance}, beyond the track edge (100)")]
pub struct OutOfTrack {
    pub distance: f64,
}

/// Heading of a displacement in joystick degrees (0 = up, clockwise).
///
/// `atan2` yields a raw angle in [-180, 180] measured from +x with y
/// pointing down. Positive raw angles are shifted by 90; the rest are
/// folded through `270 + (180 + raw)` and wrapped below 360.
pub fn heading_degrees(offset: Offset) -> f64 {
    let raw = offset.dy.atan2(offset.dx) * 180.0 / PI;
    if raw > 0.0 {
        raw + 90.0
    } else {
        let folded = 270.0 + (180.0 + raw);
        if folded >= 360.0 {
            folded - 360.0
        } else {
            folded
        }
    }
}

/// Distance of a displacement as a rounded percentage of `radius`.
///
/// Halfway values round to the even integer. The result is not clamped.
pub fn travel_percent(offset: Offset, radius: f64) -> f64 {
    (offset.length() / radius * 100.0).round_ties_even()
}

/// Map a displacement to a polar reading.
///
/// Returns [`OutOfTrack`] when the rounded distance exceeds
/// [`MAX_DISTANCE`]; callers leave their state untouched in that case.
///
/// # Example
/// ```
/// use onscreen_joystick::joystick::polar::{to_polar, Offset, REFERENCE_RADIUS};
///
/// let reading = to_polar(Offset::new(67.5, 0.0), REFERENCE_RADIUS).unwrap();
/// assert_eq!(reading.distance, 50.0);
/// assert!(to_polar(Offset::new(136.0, 0.0), REFERENCE_RADIUS).is_err());
/// ```
pub fn to_polar(offset: Offset, radius: f64) -> Result<PolarReading, OutOfTrack> {
    let distance = travel_percent(offset, radius);
    // NaN distances (degenerate radius) are treated as out of track as well
    if !(distance <= MAX_DISTANCE) {
        return Err(OutOfTrack { distance });
    }

    Ok(PolarReading {
        angle: heading_degrees(offset),
        distance,
    })
}
