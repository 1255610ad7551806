// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Monitor configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! sensor_path = "/sys/class/thermal/thermal_zone0/temp"
//! max_safe_celsius = 82.0
//! interval_ms = 500
//! read_timeout_ms = 1000
//! max_iterations = 600
//! ```

use crate::thermal::{MAX_SAFE_TEMP_RPI4, THERMAL_ZONE_PATH};
use crate::{MonitorError, SysfsThermalSensor, TimeoutSensor};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a monitoring run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MonitorConfig {
    /// Thermal zone file to sample.
    #[serde(default = "default_sensor_path")]
    pub sensor_path: PathBuf,
    /// Readings at or above this temperature end the run (°C).
    #[serde(default = "default_max_safe")]
    pub max_safe_celsius: f64,
    /// Delay between loop iterations in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Deadline for a single sensor read in milliseconds.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// Stop after this many iterations; run until interrupted if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u64>,
}

fn default_sensor_path() -> PathBuf {
    PathBuf::from(THERMAL_ZONE_PATH)
}

fn default_max_safe() -> f64 {
    MAX_SAFE_TEMP_RPI4
}

fn default_interval_ms() -> u64 {
    500
}

fn default_read_timeout_ms() -> u64 {
    1000
}

impl MonitorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, MonitorError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MonitorError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, MonitorError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| MonitorError::ConfigError(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, MonitorError> {
        toml::to_string_pretty(self)
            .map_err(|e| MonitorError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Rejects values the host loop cannot run with.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if !self.max_safe_celsius.is_finite() {
            return Err(MonitorError::ConfigError(format!(
                "max_safe_celsius must be finite, got {}",
                self.max_safe_celsius
            )));
        }
        if self.interval_ms == 0 {
            return Err(MonitorError::ConfigError(
                "interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.read_timeout_ms == 0 {
            return Err(MonitorError::ConfigError(
                "read_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Delay between iterations.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Deadline for one sensor read.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Builds the sysfs sensor described by this config, bounded by
    /// [`read_timeout`](Self::read_timeout).
    pub fn create_sensor(&self) -> TimeoutSensor<SysfsThermalSensor> {
        TimeoutSensor::new(
            SysfsThermalSensor::new(&self.sensor_path),
            self.read_timeout(),
        )
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sensor_path: default_sensor_path(),
            max_safe_celsius: default_max_safe(),
            interval_ms: default_interval_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            max_iterations: None,
        }
    }
}
