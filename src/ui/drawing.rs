//! Drawing primitives for the joystick pad
//!
//! Track, knob and heading indicator. All sizes are in screen points.

use egui::{Color32, Painter, Pos2, Stroke};

const TRACK_FILL: Color32 = Color32::from_gray(30);
const TRACK_EDGE: Color32 = Color32::from_gray(100);
const GUIDE: Color32 = Color32::from_gray(60);

/// Draw a center crosshair on the painter
pub fn draw_crosshair(painter: &Painter, center: Pos2, size: f32, color: Color32) {
    painter.line_segment(
        [
            egui::pos2(center.x - size, center.y),
            egui::pos2(center.x + size, center.y),
        ],
        Stroke::new(1.0, color),
    );
    painter.line_segment(
        [
            egui::pos2(center.x, center.y - size),
            egui::pos2(center.x, center.y + size),
        ],
        Stroke::new(1.0, color),
    );
}

/// Circular track with half-travel ring and center crosshair
pub fn draw_track(painter: &Painter, center: Pos2, radius: f32) {
    painter.circle_filled(center, radius, TRACK_FILL);
    painter.circle_stroke(center, radius, Stroke::new(1.5, TRACK_EDGE));
    painter.circle_stroke(center, radius * 0.5, Stroke::new(1.0, GUIDE));
    draw_crosshair(painter, center, radius, GUIDE);
}

/// Line from the center toward the knob, drawn only away from center
pub fn draw_heading(painter: &Painter, center: Pos2, knob: Pos2, color: Color32) {
    if center.distance(knob) < 1.0 {
        return;
    }
    painter.line_segment([center, knob], Stroke::new(2.0, color.gamma_multiply(0.6)));
}

/// Knob disc; outlined brighter while held
pub fn draw_knob(painter: &Painter, pos: Pos2, radius: f32, color: Color32, held: bool) {
    painter.circle_filled(pos, radius, color);
    let edge = if held {
        Stroke::new(2.5, Color32::WHITE)
    } else {
        Stroke::new(1.0, Color32::from_gray(200))
    };
    painter.circle_stroke(pos, radius, edge);
}

/// Knob color by travel percent (gray near center, yellow mid, green at the rim)
pub fn distance_color(distance: f64) -> Color32 {
    if distance >= 95.0 {
        Color32::from_rgb(100, 255, 100)
    } else if distance > 10.0 {
        Color32::from_rgb(255, 200, 100)
    } else {
        Color32::from_gray(150)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_color_bands() {
        assert_eq!(distance_color(0.0), Color32::from_gray(150));
        assert_eq!(distance_color(10.0), Color32::from_gray(150));
        assert_eq!(distance_color(50.0), Color32::from_rgb(255, 200, 100));
        assert_eq!(distance_color(100.0), Color32::from_rgb(100, 255, 100));
    }
}
