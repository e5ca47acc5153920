//! egui widget driving a [`JoystickControl`]
//!
//! Translates egui drags into pointer events in the joystick's layout units
//! and ticks the return animation once per frame while the knob glides back.

use egui::{Pos2, Response, Sense, Ui, Vec2, Widget};
use std::time::Duration;

use super::drawing::{distance_color, draw_heading, draw_knob, draw_track};
use crate::joystick::{DragPhase, JoystickControl, Offset, Point};

/// Knob radius as a fraction of the track radius
const KNOB_RATIO: f32 = 0.28;

/// Space kept around the track so the knob stays inside the widget at full travel
const EDGE_MARGIN: f32 = 4.0;

/// Screen-to-layout mapping for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadGeometry {
    pub center: Pos2,
    /// Track radius in screen points
    pub track_px: f32,
    /// Track radius in joystick layout units
    pub radius: f64,
}

impl PadGeometry {
    /// Fit a track into a square widget of `side` points
    pub fn fit(center: Pos2, side: f32, radius: f64) -> Self {
        let track_px = ((side / 2.0 - EDGE_MARGIN) / (1.0 + KNOB_RATIO)).max(1.0);
        Self {
            center,
            track_px,
            radius,
        }
    }

    fn units_per_point(&self) -> f64 {
        self.radius / f64::from(self.track_px)
    }

    pub fn knob_px(&self) -> f32 {
        self.track_px * KNOB_RATIO
    }

    /// Screen position relative to the center, in layout units
    pub fn to_layout(&self, pos: Pos2) -> Point {
        let scale = self.units_per_point();
        Point::new(
            f64::from(pos.x - self.center.x) * scale,
            f64::from(pos.y - self.center.y) * scale,
        )
    }

    pub fn knob_screen(&self, offset: Offset) -> Pos2 {
        let scale = self.units_per_point();
        self.center + Vec2::new((offset.dx / scale) as f32, (offset.dy / scale) as f32)
    }

    pub fn hits_knob(&self, pos: Pos2, offset: Offset) -> bool {
        self.knob_screen(offset).distance(pos) <= self.knob_px()
    }
}

/// Draggable joystick pad
pub struct JoystickPad<'a, J: JoystickControl + ?Sized> {
    joystick: &'a mut J,
    side: f32,
}

impl<'a, J: JoystickControl + ?Sized> JoystickPad<'a, J> {
    pub fn new(joystick: &'a mut J) -> Self {
        Self {
            joystick,
            side: 300.0,
        }
    }

    /// Side length of the square widget in points
    pub fn side(mut self, side: f32) -> Self {
        self.side = side;
        self
    }
}

impl<J: JoystickControl + ?Sized> Widget for JoystickPad<'_, J> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(self.side), Sense::drag());
        let geometry = PadGeometry::fit(rect.center(), self.side, self.joystick.state().radius());

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                // Only a press on the knob grabs it
                if geometry.hits_knob(pos, self.joystick.state().knob_offset()) {
                    self.joystick.pointer_down(geometry.to_layout(pos));
                }
            }
        } else if response.dragged() && self.joystick.state().is_captured() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.joystick.pointer_move(geometry.to_layout(pos));
            }
        }

        if response.drag_stopped() {
            self.joystick.pointer_up();
        }

        if self.joystick.state().phase() == DragPhase::Releasing {
            let dt = ui.input(|i| i.stable_dt);
            self.joystick.advance(Duration::from_secs_f32(dt.max(0.0)));
            ui.ctx().request_repaint();
        }

        if ui.is_rect_visible(rect) {
            let state = self.joystick.state();
            let painter = ui.painter_at(rect);
            let knob = geometry.knob_screen(state.knob_offset());
            let color = distance_color(state.distance());

            draw_track(&painter, geometry.center, geometry.track_px);
            draw_heading(&painter, geometry.center, knob, color);
            draw_knob(&painter, knob, geometry.knob_px(), color, state.is_captured());
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> PadGeometry {
        PadGeometry {
            center: Pos2::new(100.0, 100.0),
            track_px: 50.0,
            radius: 135.0,
        }
    }

    #[test]
    fn test_full_track_maps_to_radius() {
        let g = geometry();
        let p = g.to_layout(Pos2::new(150.0, 100.0));
        assert!((p.x - 135.0).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);

        let p = g.to_layout(Pos2::new(100.0, 75.0));
        assert!((p.y + 67.5).abs() < 1e-6);
    }

    #[test]
    fn test_knob_screen_inverts_layout() {
        let g = geometry();
        let pos = g.knob_screen(Offset::new(-135.0, 67.5));
        assert!((pos.x - 50.0).abs() < 1e-4);
        assert!((pos.y - 125.0).abs() < 1e-4);
    }

    #[test]
    fn test_hits_knob_follows_offset() {
        let g = geometry();
        assert!(g.hits_knob(Pos2::new(105.0, 100.0), Offset::ZERO));
        assert!(!g.hits_knob(Pos2::new(140.0, 100.0), Offset::ZERO));
        assert!(g.hits_knob(Pos2::new(140.0, 100.0), Offset::new(108.0, 0.0)));
    }

    #[test]
    fn test_fit_leaves_room_for_knob() {
        let g = PadGeometry::fit(Pos2::new(150.0, 150.0), 300.0, 135.0);
        assert!(g.track_px + g.knob_px() <= 150.0);
        assert!(g.track_px > 100.0);
    }
}
