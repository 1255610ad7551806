// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # thermal-watch
//!
//! Host control loop that samples the SoC temperature every iteration and
//! powers the application down once the device is no longer safe.
//!
//! ## Usage
//! ```bash
//! # Run until Ctrl-C or until the SoC reaches 82 C
//! thermal-watch watch --overlay
//!
//! # Stop after 120 iterations and print the summary as JSON
//! thermal-watch watch --iterations 120 --json
//!
//! # One-shot reading
//! thermal-watch status
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "thermal-watch",
    about = "Temperature-guarded host loop for edge devices",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (CLI flags override its values).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Thermal zone file to read (overrides the configuration).
    #[arg(short, long, global = true)]
    sensor: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitoring loop until interrupted, overheated, or done.
    Watch {
        /// Shutdown threshold in degrees Celsius.
        #[arg(long)]
        max_temp: Option<f64>,

        /// Delay between iterations in milliseconds.
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Stop after this many iterations.
        #[arg(short = 'n', long)]
        iterations: Option<u64>,

        /// Print the per-iteration overlay text block.
        #[arg(long)]
        overlay: bool,

        /// Print the final summary as JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },

    /// Take a single reading and report whether it is safe.
    Status {
        /// Print the reading as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    let mut config = commands::load_config(cli.config.as_deref())?;
    if let Some(sensor) = cli.sensor {
        config.sensor_path = sensor;
    }

    match cli.command {
        Commands::Watch {
            max_temp,
            interval_ms,
            iterations,
            overlay,
            json,
        } => {
            if let Some(t) = max_temp {
                config.max_safe_celsius = t;
            }
            if let Some(ms) = interval_ms {
                config.interval_ms = ms;
            }
            if iterations.is_some() {
                config.max_iterations = iterations;
            }
            config.validate()?;
            let options = commands::watch::WatchOptions {
                show_overlay: overlay,
                json,
            };
            commands::watch::execute(config, options).await
        }
        Commands::Status { json } => commands::status::execute(config, json).await,
    }
}
