// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod perception;
pub mod status;
pub mod watch;

use std::path::Path;
use thermal_monitor::MonitorConfig;
use tracing_subscriber::EnvFilter;

/// Initialises the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v` repetitions.
/// Logs go to stderr so the report on stdout stays machine-readable.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file if one was given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<MonitorConfig> {
    match path {
        Some(p) => {
            let config = MonitorConfig::from_file(p)?;
            tracing::info!(path = %p.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(MonitorConfig::default()),
    }
}

/// Creates a visual temperature bar (0-100 C scale).
pub fn temp_bar(celsius: f64, threshold: f64) -> String {
    let filled = ((celsius / 100.0) * 20.0).round().max(0.0) as usize;
    let filled = filled.min(20);
    let empty = 20 - filled;
    let symbol = if celsius >= threshold {
        "#"
    } else if celsius >= threshold - 20.0 {
        "="
    } else {
        "-"
    };
    format!("[{}{}]", symbol.repeat(filled), ".".repeat(empty))
}
