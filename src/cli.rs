//! Command-line helpers that run without opening a window

use anyhow::Result;
use colored::*;

use onscreen_joystick::config::JoystickConfig;
use onscreen_joystick::joystick::polar::{heading_degrees, to_polar, travel_percent};
use onscreen_joystick::joystick::Offset;

/// Print the polar reading a knob displacement would produce
pub fn run_probe(config: &JoystickConfig, dx: f64, dy: f64) -> Result<()> {
    let offset = Offset::new(dx, dy);

    println!("\n{}", "=== Joystick Probe ===".bold().cyan());
    println!("  Radius:       {}", config.radius.to_string().green());
    println!("  Displacement: ({}, {})", dx, dy);
    println!(
        "  Length:       {:.3} ({:.3}% unrounded)",
        offset.length(),
        offset.length() / config.radius * 100.0
    );

    match to_polar(offset, config.radius) {
        Ok(reading) => {
            println!("  Angle:        {}", format!("{:.3}°", reading.angle).green());
            println!("  Distance:     {}", format!("{}%", reading.distance).green());
        }
        Err(e) => {
            println!(
                "  Angle:        {}",
                format!("{:.3}°", heading_degrees(offset)).yellow()
            );
            println!(
                "  Distance:     {}",
                format!("{}%", travel_percent(offset, config.radius)).red()
            );
            println!("  {} {}", "Discarded:".red().bold(), e);
        }
    }

    Ok(())
}

/// Print the effective configuration as YAML
pub fn print_config(config: &JoystickConfig) -> Result<()> {
    println!("\n{}", "=== Effective Configuration ===".bold().cyan());
    print!("{}", config.to_yaml_string()?);
    Ok(())
}
