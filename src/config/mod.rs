//! Configuration management for the on-screen joystick
//!
//! Handles loading, parsing, validation and hot-reloading of YAML
//! configuration files.

pub mod watcher;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

use crate::joystick::polar::REFERENCE_RADIUS;
use crate::joystick::throttle::{DEFAULT_ANGLE_STEP, DEFAULT_DISTANCE_STEP};
use crate::joystick::{
    Easing, GlideToCenter, JoystickControl, JoystickState, OnScreenJoystick, VirtualJoystick,
};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JoystickConfig {
    #[serde(default)]
    pub variant: JoystickVariant,
    /// Knob travel radius in layout units; 100% distance at this length
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Degrees the angle must change before "moved" fires again
    #[serde(default = "default_angle_step")]
    pub angle_step: f64,
    /// Percent the distance must change before "moved" fires again
    #[serde(default = "default_distance_step")]
    pub distance_step: f64,
    #[serde(default)]
    pub return_animation: ReturnAnimationConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

/// Which notification contract the hosted joystick exposes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoystickVariant {
    /// Captured / moved / released notifications
    #[default]
    OnScreen,
    /// Single "stick moved" notification
    Virtual,
}

/// Return-to-center glide settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReturnAnimationConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default)]
    pub easing: Easing,
}

/// Sample host window settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_title")]
    pub title: String,
    #[serde(default = "default_window_width")]
    pub width: f32,
    #[serde(default = "default_window_height")]
    pub height: f32,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            variant: JoystickVariant::default(),
            radius: default_radius(),
            angle_step: default_angle_step(),
            distance_step: default_distance_step(),
            return_animation: ReturnAnimationConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for ReturnAnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            easing: Easing::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_window_title(),
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl ReturnAnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn glide(&self) -> GlideToCenter {
        GlideToCenter::new(self.duration(), self.easing)
    }
}

impl JoystickConfig {
    /// Load configuration from file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_yaml_str(&contents)
    }

    /// Load configuration from file, or defaults when there is no file
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !fs::try_exists(path).await.unwrap_or(false) {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path).await
    }

    /// Save configuration to file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let yaml = self.to_yaml_string()?;

        fs::write(path, yaml)
            .await
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: JoystickConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the joystick cannot work with.
    ///
    /// Out-of-range steps are not errors; the joystick clamps them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "radius must be a positive number, got {}",
                self.radius
            )));
        }
        if self.angle_step.is_nan() || self.distance_step.is_nan() {
            return Err(ConfigError::Invalid("steps must be numbers".to_string()));
        }
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "window size must be positive, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        Ok(())
    }

    pub fn build_on_screen(&self) -> OnScreenJoystick {
        let mut joystick =
            OnScreenJoystick::with_animation(self.radius, Box::new(self.return_animation.glide()));
        self.apply_tuning(joystick.state_mut());
        joystick
    }

    pub fn build_virtual(&self) -> VirtualJoystick {
        let mut joystick =
            VirtualJoystick::with_animation(self.radius, Box::new(self.return_animation.glide()));
        self.apply_tuning(joystick.state_mut());
        joystick
    }

    /// Push steps and animation timing into a live joystick.
    ///
    /// Radius and variant need a fresh joystick and are left alone.
    pub fn apply_tuning(&self, state: &mut JoystickState) {
        state.set_angle_step(self.angle_step);
        state.set_distance_step(self.distance_step);
        state.set_animation(Box::new(self.return_animation.glide()));
    }
}

// Default value functions
fn default_radius() -> f64 { REFERENCE_RADIUS }
fn default_angle_step() -> f64 { DEFAULT_ANGLE_STEP }
fn default_distance_step() -> f64 { DEFAULT_DISTANCE_STEP }
fn default_duration_ms() -> u64 { 200 }
fn default_window_title() -> String { "On-Screen Joystick".to_string() }
fn default_window_width() -> f32 { 420.0 }
fn default_window_height() -> f32 { 480.0 }

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = JoystickConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, JoystickConfig::default());
        assert_eq!(config.radius, 135.0);
        assert_eq!(config.return_animation.easing, Easing::EaseOut);
    }

    #[test]
    fn test_parse_full_document() {
        let yaml = r#"
variant: virtual
radius: 90
angle_step: 5
distance_step: 10
return_animation:
  duration_ms: 350
  easing: ease_in_out
window:
  title: "Test"
  width: 300
  height: 320
"#;
        let config = JoystickConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.variant, JoystickVariant::Virtual);
        assert_eq!(config.radius, 90.0);
        assert_eq!(config.angle_step, 5.0);
        assert_eq!(config.return_animation.duration(), Duration::from_millis(350));
        assert_eq!(config.return_animation.easing, Easing::EaseInOut);
        assert_eq!(config.window.title, "Test");
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let err = JoystickConfig::from_yaml_str("radius: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = JoystickConfig::from_yaml_str("radius: -5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_unknown_variant_is_parse_error() {
        let err = JoystickConfig::from_yaml_str("variant: sideways").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_out_of_range_steps_are_clamped_by_joystick() {
        let config = JoystickConfig {
            angle_step: 400.0,
            distance_step: 0.1,
            ..JoystickConfig::default()
        };
        config.validate().unwrap();

        let joystick = config.build_on_screen();
        assert_eq!(joystick.angle_step(), 90.0);
        assert_eq!(joystick.distance_step(), 1.0);
    }

    #[test]
    fn test_build_virtual_uses_radius() {
        let config = JoystickConfig {
            radius: 50.0,
            ..JoystickConfig::default()
        };
        let joystick = config.build_virtual();
        assert_eq!(joystick.state().radius(), 50.0);
    }

    #[tokio::test]
    async fn test_save_and_load() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("joystick.yaml");

        let config = JoystickConfig {
            variant: JoystickVariant::Virtual,
            angle_step: 15.0,
            ..JoystickConfig::default()
        };
        config.save(&path).await?;

        let loaded = JoystickConfig::load(&path).await?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_or_default() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("joystick.yaml");

        let config = JoystickConfig::load_or_default(&path).await?;
        assert_eq!(config, JoystickConfig::default());

        std::fs::write(&path, "variant: virtual\nradius: 60\n")?;
        let config = JoystickConfig::load_or_default(&path).await?;
        assert_eq!(config.variant, JoystickVariant::Virtual);
        assert_eq!(config.radius, 60.0);

        std::fs::write(&path, "radius: 0\n")?;
        let err = JoystickConfig::load_or_default(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = JoystickConfig::load("/definitely/not/here.yaml")
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
