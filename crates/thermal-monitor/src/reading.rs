// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! A single timestamped temperature sample.

use chrono::{DateTime, Local};
use std::fmt;

/// Timestamp layout used in every human-readable line (local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One temperature sample taken at a specific instant.
///
/// Readings are produced by a [`SensorReader`](crate::SensorReader) and are
/// never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature_celsius: f64,
    /// Local wall-clock time at which the sample was taken.
    pub timestamp: DateTime<Local>,
}

impl Reading {
    /// Creates a reading from a temperature and an explicit timestamp.
    pub fn new(temperature_celsius: f64, timestamp: DateTime<Local>) -> Self {
        Self {
            temperature_celsius,
            timestamp,
        }
    }

    /// Creates a reading stamped with the current local time.
    pub fn now(temperature_celsius: f64) -> Self {
        Self::new(temperature_celsius, Local::now())
    }

    /// Returns the temperature in degrees Fahrenheit.
    pub fn fahrenheit(&self) -> f64 {
        celsius_to_fahrenheit(self.temperature_celsius)
    }

    /// Returns the timestamp rendered as `YYYY-MM-DD HH:MM:SS`.
    pub fn formatted_timestamp(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}

/// Renders as `54.32C/129.78F at time 2025-06-01 12:00:00`.
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at time {}",
            dual_scale(self.temperature_celsius),
            self.formatted_timestamp()
        )
    }
}

/// Converts Celsius to Fahrenheit (`C * 9/5 + 32`).
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * (9.0 / 5.0) + 32.0
}

/// Formats a Celsius value as `<C>C/<F>F`, both to two decimals.
pub fn dual_scale(celsius: f64) -> String {
    format!("{:.2}C/{:.2}F", celsius, celsius_to_fahrenheit(celsius))
}

/// Formats a timestamp with [`TIMESTAMP_FORMAT`].
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
