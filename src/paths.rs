//! Where the joystick config lives.
//!
//! ## Mode Detection
//!
//! - **Dev mode** (debug builds): `joystick.yaml` in the current working
//!   directory wins.
//! - **Portable mode**: a `.portable` marker next to the executable keeps
//!   the config beside it.
//! - **Installed mode** (default): the per-user config directory, e.g.
//!   `~/.config/onscreen-joystick` or `%APPDATA%\onscreen-joystick`.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name used in installed mode
const APP_NAME: &str = "onscreen-joystick";

/// Config file name in every mode
pub const CONFIG_FILE_NAME: &str = "joystick.yaml";

#[derive(Debug, Clone, PartialEq)]
pub struct AppPaths {
    /// Path to the configuration file
    pub config: PathBuf,
    /// Whether the config sits next to the executable (or in cwd)
    pub is_portable: bool,
}

impl AppPaths {
    /// Detect the config location.
    ///
    /// Called before logging is initialized, so diagnostics go to stderr.
    pub fn detect() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        #[cfg(debug_assertions)]
        {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            let cwd_config = cwd.join(CONFIG_FILE_NAME);
            if cwd_config.exists() {
                eprintln!(
                    "[paths] Running in DEV mode ({} found in cwd: {})",
                    CONFIG_FILE_NAME,
                    cwd.display()
                );
                return Self::portable(&cwd);
            }
        }

        if exe_dir.join(".portable").exists() {
            #[cfg(debug_assertions)]
            eprintln!("[paths] Running in PORTABLE mode (.portable marker found)");
            return Self::portable(&exe_dir);
        }

        let config_root = dirs::config_dir().unwrap_or_else(|| {
            eprintln!("[paths] WARNING: no per-user config dir, falling back to exe dir");
            exe_dir.clone()
        });
        Self::installed(&config_root)
    }

    fn portable(dir: &Path) -> Self {
        Self {
            config: dir.join(CONFIG_FILE_NAME),
            is_portable: true,
        }
    }

    fn installed(config_root: &Path) -> Self {
        Self {
            config: config_root.join(APP_NAME).join(CONFIG_FILE_NAME),
            is_portable: false,
        }
    }

    /// Directory holding the config file
    pub fn base_dir(&self) -> PathBuf {
        self.config
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Create the config directory in installed mode
    pub fn ensure_directories(&self) -> anyhow::Result<()> {
        if self.is_portable {
            return Ok(());
        }
        let base = self.base_dir();
        if !base.exists() {
            debug!("Creating config directory: {}", base.display());
            std::fs::create_dir_all(&base)?;
        }
        Ok(())
    }
}
