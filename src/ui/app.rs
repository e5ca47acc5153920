//! Sample host window
//!
//! Shows one joystick and a label fed by its "moved" notification, the way
//! an application embedding the widget would.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::widget::JoystickPad;
use crate::config::watcher::ConfigWatcher;
use crate::config::{JoystickConfig, JoystickVariant};
use crate::joystick::{
    DragPhase, JoystickControl, JoystickState, OnScreenJoystick, VirtualJoystick,
};

/// Label text shown for a moved notification
pub fn moved_label(angle: f64, distance: f64) -> String {
    format!(
        "Joystick Distance:{}, Joystick Angle:{}",
        distance, angle as i64
    )
}

/// The joystick variant this window hosts
pub enum HostedJoystick {
    OnScreen(OnScreenJoystick),
    Virtual(VirtualJoystick),
}

impl HostedJoystick {
    fn control(&mut self) -> &mut dyn JoystickControl {
        match self {
            HostedJoystick::OnScreen(j) => j,
            HostedJoystick::Virtual(j) => j,
        }
    }

    fn state(&self) -> &JoystickState {
        match self {
            HostedJoystick::OnScreen(j) => j.state(),
            HostedJoystick::Virtual(j) => j.state(),
        }
    }

    fn variant(&self) -> JoystickVariant {
        match self {
            HostedJoystick::OnScreen(_) => JoystickVariant::OnScreen,
            HostedJoystick::Virtual(_) => JoystickVariant::Virtual,
        }
    }
}

/// Text shared between joystick listeners and the UI
#[derive(Debug, Default)]
struct HostLabels {
    moved: String,
    lifecycle: String,
}

pub struct JoystickHostApp {
    joystick: HostedJoystick,
    labels: Arc<Mutex<HostLabels>>,
    config: JoystickConfig,
    watcher: Option<ConfigWatcher>,
    /// Command-line variant, wins over every loaded config
    variant_override: Option<JoystickVariant>,
}

impl JoystickHostApp {
    pub fn new(config: JoystickConfig, watcher: Option<ConfigWatcher>) -> Self {
        Self::with_variant_override(config, watcher, None)
    }

    pub fn with_variant_override(
        mut config: JoystickConfig,
        watcher: Option<ConfigWatcher>,
        variant_override: Option<JoystickVariant>,
    ) -> Self {
        if let Some(variant) = variant_override {
            config.variant = variant;
        }
        let labels = Arc::new(Mutex::new(HostLabels {
            moved: moved_label(0.0, 0.0),
            lifecycle: "Idle".to_string(),
        }));
        let joystick = build_joystick(&config, &labels);

        Self {
            joystick,
            labels,
            config,
            watcher,
            variant_override,
        }
    }

    /// Apply a reloaded config. Tuning goes into the live joystick; a
    /// radius or variant change rebuilds it.
    fn apply_config(&mut self, mut config: JoystickConfig) {
        if let Some(variant) = self.variant_override {
            config.variant = variant;
        }

        let rebuild = config.radius != self.config.radius
            || config.variant != self.joystick.variant();

        if rebuild {
            info!(
                "Rebuilding {:?} joystick (radius {})",
                config.variant, config.radius
            );
            self.joystick = build_joystick(&config, &self.labels);
        } else {
            debug!(
                "Applying steps {}/{} to live joystick",
                config.angle_step, config.distance_step
            );
            config.apply_tuning(self.joystick.control().state_mut());
        }

        if config.window.title != self.config.window.title {
            warn!("Window title changes apply on next start");
        }
        self.config = config;
    }

    fn poll_config(&mut self) {
        let Some(watcher) = self.watcher.as_mut() else {
            return;
        };
        if let Some(config) = watcher.try_latest() {
            self.apply_config(config);
        }
    }
}

fn build_joystick(config: &JoystickConfig, labels: &Arc<Mutex<HostLabels>>) -> HostedJoystick {
    match config.variant {
        JoystickVariant::OnScreen => {
            let mut joystick = config.build_on_screen();

            let sink = labels.clone();
            joystick.on_moved(move |e| sink.lock().moved = moved_label(e.angle, e.distance));
            let sink = labels.clone();
            joystick.on_captured(move || sink.lock().lifecycle = "Captured".to_string());
            let sink = labels.clone();
            joystick.on_released(move || sink.lock().lifecycle = "Released".to_string());

            HostedJoystick::OnScreen(joystick)
        }
        JoystickVariant::Virtual => {
            let mut joystick = config.build_virtual();

            let sink = labels.clone();
            joystick.on_stick_moved(move |state| {
                sink.lock().moved = moved_label(state.angle(), state.distance())
            });

            HostedJoystick::Virtual(joystick)
        }
    }
}

impl eframe::App for JoystickHostApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_config();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                let variant = self.joystick.variant();
                let kind = match variant {
                    JoystickVariant::OnScreen => "On-screen joystick",
                    JoystickVariant::Virtual => "Virtual joystick",
                };
                ui.heading(egui::RichText::new(kind).size(18.0).strong());
                ui.add_space(8.0);

                let side = ui.available_width().min(ui.available_height() - 60.0).max(80.0);
                ui.add(JoystickPad::new(self.joystick.control()).side(side));

                ui.add_space(8.0);
                let labels = self.labels.lock();
                ui.label(egui::RichText::new(labels.moved.as_str()).size(14.0));

                let state = self.joystick.state();
                let phase_color = match state.phase() {
                    DragPhase::Captured => egui::Color32::from_rgb(100, 255, 100),
                    DragPhase::Releasing => egui::Color32::from_rgb(255, 200, 100),
                    DragPhase::Idle => egui::Color32::from_gray(150),
                };
                let status = match variant {
                    JoystickVariant::OnScreen => {
                        format!("{:?} (last event: {})", state.phase(), labels.lifecycle)
                    }
                    JoystickVariant::Virtual => format!("{:?}", state.phase()),
                };
                ui.label(egui::RichText::new(status).color(phase_color).size(11.0));
            });
        });

        // The pad requests repaints itself while gliding; poll for config
        // reloads at a relaxed rate otherwise.
        if self.watcher.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joystick::Point;

    #[test]
    fn test_moved_label_truncates_angle() {
        assert_eq!(
            moved_label(269.9, 100.0),
            "Joystick Distance:100, Joystick Angle:269"
        );
        assert_eq!(moved_label(0.0, 0.0), "Joystick Distance:0, Joystick Angle:0");
    }

    #[test]
    fn test_on_screen_host_updates_labels() {
        let mut app = JoystickHostApp::new(JoystickConfig::default(), None);
        let control = app.joystick.control();
        control.pointer_down(Point::ORIGIN);
        control.pointer_move(Point::new(0.0, 67.5));

        let labels = app.labels.lock();
        assert_eq!(labels.moved, "Joystick Distance:50, Joystick Angle:180");
        assert_eq!(labels.lifecycle, "Captured");
    }

    #[test]
    fn test_virtual_host_updates_label() {
        let config = JoystickConfig {
            variant: JoystickVariant::Virtual,
            ..JoystickConfig::default()
        };
        let mut app = JoystickHostApp::new(config, None);
        let control = app.joystick.control();
        control.pointer_down(Point::ORIGIN);
        control.pointer_move(Point::new(135.0, 0.0));

        assert_eq!(
            app.labels.lock().moved,
            "Joystick Distance:100, Joystick Angle:90"
        );
    }

    #[test]
    fn test_reload_keeps_drag_and_applies_steps() {
        let mut app = JoystickHostApp::new(JoystickConfig::default(), None);
        app.joystick.control().pointer_down(Point::ORIGIN);
        app.joystick.control().pointer_move(Point::new(27.0, 0.0));

        app.apply_config(JoystickConfig {
            angle_step: 20.0,
            distance_step: 25.0,
            ..JoystickConfig::default()
        });

        let state = app.joystick.state();
        assert!(state.is_captured());
        assert_eq!(state.angle_step(), 20.0);
        assert_eq!(state.distance_step(), 25.0);
        assert_eq!(state.distance(), 20.0);
    }

    #[test]
    fn test_reload_with_new_variant_rebuilds() {
        let mut app = JoystickHostApp::new(JoystickConfig::default(), None);
        app.apply_config(JoystickConfig {
            variant: JoystickVariant::Virtual,
            ..JoystickConfig::default()
        });
        assert!(matches!(app.joystick, HostedJoystick::Virtual(_)));
    }

    #[test]
    fn test_reload_keeps_command_line_variant() {
        let mut app = JoystickHostApp::with_variant_override(
            JoystickConfig::default(),
            None,
            Some(JoystickVariant::Virtual),
        );
        assert!(matches!(app.joystick, HostedJoystick::Virtual(_)));

        app.joystick.control().pointer_down(Point::ORIGIN);
        app.joystick.control().pointer_move(Point::new(27.0, 0.0));

        // The file says nothing about the variant, only the steps changed
        app.apply_config(JoystickConfig {
            distance_step: 5.0,
            ..JoystickConfig::default()
        });

        assert!(matches!(app.joystick, HostedJoystick::Virtual(_)));
        let state = app.joystick.state();
        assert!(state.is_captured());
        assert_eq!(state.distance(), 20.0);
        assert_eq!(state.distance_step(), 5.0);
    }
}
