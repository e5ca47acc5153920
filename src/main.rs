//! On-screen joystick sample host
//!
//! Opens a window with one joystick and a label showing its last reported
//! angle and distance.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use onscreen_joystick::config::watcher::ConfigWatcher;
use onscreen_joystick::config::{JoystickConfig, JoystickVariant};
use onscreen_joystick::paths::AppPaths;

/// On-screen joystick - drag the knob, read angle and distance
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults to the detected location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Override the configured joystick variant
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Print the angle/distance for a knob displacement and exit
    #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_negative_numbers = true)]
    probe: Option<Vec<f64>>,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    write_default_config: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    show_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    OnScreen,
    Virtual,
}

impl From<VariantArg> for JoystickVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::OnScreen => JoystickVariant::OnScreen,
            VariantArg::Virtual => JoystickVariant::Virtual,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => {
            let paths = AppPaths::detect();
            paths.ensure_directories()?;
            paths.config
        }
    };
    info!("Configuration file: {}", config_path.display());

    if args.write_default_config {
        JoystickConfig::default()
            .save(&config_path)
            .await
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        info!("Default configuration written to {}", config_path.display());
        return Ok(());
    }

    let variant_override: Option<JoystickVariant> = args.variant.map(Into::into);

    // One-shot flags read the file once and never start a watcher
    if args.probe.is_some() || args.show_config {
        let mut config = JoystickConfig::load_or_default(&config_path)
            .await
            .with_context(|| format!("Failed to load {}", config_path.display()))?;
        if let Some(variant) = variant_override {
            config.variant = variant;
        }

        if let Some([dx, dy]) = args.probe.as_deref() {
            return cli::run_probe(&config, *dx, *dy);
        }
        return cli::print_config(&config);
    }

    let (watcher, config) = if config_path.exists() {
        let (watcher, initial) = ConfigWatcher::new(&config_path).await?;
        info!("Configuration loaded with hot-reload enabled");
        (Some(watcher), (*initial).clone())
    } else {
        warn!(
            "No config at {}, using defaults (see --write-default-config)",
            config_path.display()
        );
        (None, JoystickConfig::default())
    };

    info!(
        "Starting {:?} joystick host...",
        variant_override.unwrap_or(config.variant)
    );
    onscreen_joystick::ui::run_host(config, watcher, variant_override)?;

    info!("Joystick host closed");
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}
