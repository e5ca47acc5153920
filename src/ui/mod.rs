//! egui host layer for the joystick
//!
//! [`JoystickPad`] is the reusable widget; [`run_host`] opens the sample
//! window around it.

mod app;
pub mod drawing;
pub mod widget;

pub use app::{moved_label, HostedJoystick, JoystickHostApp};
pub use widget::{JoystickPad, PadGeometry};

use anyhow::Result;

use crate::config::watcher::ConfigWatcher;
use crate::config::{JoystickConfig, JoystickVariant};

/// Open the sample host window. Blocks until the window is closed.
///
/// `variant_override` is applied to the initial config and to every reload.
pub fn run_host(
    config: JoystickConfig,
    watcher: Option<ConfigWatcher>,
    variant_override: Option<JoystickVariant>,
) -> Result<()> {
    let window = config.window.clone();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(window.title.clone())
            .with_inner_size([window.width, window.height])
            .with_min_inner_size([200.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        &window.title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(JoystickHostApp::with_variant_override(
                config,
                watcher,
                variant_override,
            )))),
    )
    .map_err(|e| anyhow::anyhow!("Host window failed: {}", e))
}
