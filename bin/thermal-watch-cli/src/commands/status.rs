// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `thermal-watch status` command: one reading and a safety verdict.
//!
//! Off an RPi 4 (e.g., Docker, x86 laptops) the default thermal zone may
//! not exist; the command then fails instead of guessing a temperature.

use super::temp_bar;
use thermal_monitor::overlay::safety_message;
use thermal_monitor::{MonitorConfig, SensorReader};

pub async fn execute(config: MonitorConfig, json: bool) -> anyhow::Result<()> {
    let sensor = config.create_sensor();
    let reading = tokio::task::spawn_blocking(move || sensor.read()).await??;

    if json {
        println!("{}", serde_json::to_string_pretty(&reading)?);
        return Ok(());
    }

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║           thermal-watch · Thermal Status            ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let threshold = config.max_safe_celsius;
    let celsius = reading.temperature_celsius;
    println!("  Sensor:       {}", config.sensor_path.display());
    println!("  Reading:      {reading}");
    println!("  Temperature:  {celsius:.1} C  {}", temp_bar(celsius, threshold));
    println!(
        "  Headroom:     {:.1} C to safety threshold ({threshold:.1} C)",
        threshold - celsius,
    );
    println!("  Status:       {}", safety_message(&reading, threshold));
    println!();

    Ok(())
}
