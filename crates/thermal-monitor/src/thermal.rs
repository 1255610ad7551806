// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CPU thermal sensor backed by `/sys/class/thermal/`.
//!
//! On the RPi 4, thermal zone 0 (`/sys/class/thermal/thermal_zone0/temp`)
//! reports the SoC temperature in millidegrees Celsius. The BCM2711 begins
//! throttling at 80 °C; from 82 °C upward the device is considered unsafe.

use crate::{MonitorError, Reading, SensorReader};
use std::path::{Path, PathBuf};

/// Maximum safe SoC temperature for a Raspberry Pi 4 (degrees Celsius).
///
/// A reading at or above this value is unsafe.
pub const MAX_SAFE_TEMP_RPI4: f64 = 82.0;

/// Default sysfs path for the CPU thermal zone.
pub const THERMAL_ZONE_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";

/// Reads the SoC temperature from a Linux thermal zone file.
///
/// Every call re-reads the file; nothing is cached.
#[derive(Debug, Clone)]
pub struct SysfsThermalSensor {
    path: PathBuf,
}

impl SysfsThermalSensor {
    /// Creates a sensor for the given thermal zone file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the thermal zone file this sensor reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the temperature in degrees Celsius.
    ///
    /// The kernel reports millidegrees (e.g., `54321` means 54.321 °C).
    pub fn read_celsius(&self) -> Result<f64, MonitorError> {
        let content = read_sysfs_file(&self.path)?;
        let millidegrees: i64 = content.parse::<i64>().map_err(|_| {
            MonitorError::unavailable(
                self.path.display().to_string(),
                format!("expected integer millidegrees, got '{content}'"),
            )
        })?;
        Ok(millidegrees as f64 / 1000.0)
    }
}

impl Default for SysfsThermalSensor {
    fn default() -> Self {
        Self::new(THERMAL_ZONE_PATH)
    }
}

impl SensorReader for SysfsThermalSensor {
    fn read(&self) -> Result<Reading, MonitorError> {
        let celsius = self.read_celsius()?;
        tracing::debug!(path = %self.path.display(), celsius, "thermal zone sampled");
        Ok(Reading::now(celsius))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads a sysfs file and returns its trimmed content.
fn read_sysfs_file(path: &Path) -> Result<String, MonitorError> {
    if !path.exists() {
        return Err(MonitorError::unavailable(
            path.display().to_string(),
            "sysfs path not found (is this an RPi 4?)",
        ));
    }
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| MonitorError::unavailable(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Creates a temporary file with the given content and returns its path.
    /// The caller is responsible for cleanup.
    fn write_temp(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("thermal_watch_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, "{content}").unwrap();
        path
    }

    #[test]
    fn test_parse_millidegrees() {
        let p = write_temp("zone_54321", "54321\n");
        let sensor = SysfsThermalSensor::new(&p);
        let reading = sensor.read().unwrap();
        assert!((reading.temperature_celsius - 54.321).abs() < 1e-9);
        let _ = std::fs::remove_file(&p);
    }

    #[test]
    fn test_parse_exact_threshold() {
        let p = write_temp("zone_82000", "82000");
        let celsius = SysfsThermalSensor::new(&p).read_celsius().unwrap();
        assert!((celsius - MAX_SAFE_TEMP_RPI4).abs() < 1e-9);
        let _ = std::fs::remove_file(&p);
    }

    #[test]
    fn test_reads_are_fresh() {
        let p = write_temp("zone_fresh", "40000");
        let sensor = SysfsThermalSensor::new(&p);
        assert!((sensor.read_celsius().unwrap() - 40.0).abs() < 1e-9);
        std::fs::write(&p, "61500").unwrap();
        assert!((sensor.read_celsius().unwrap() - 61.5).abs() < 1e-9);
        let _ = std::fs::remove_file(&p);
    }

    #[test]
    fn test_missing_file() {
        let sensor = SysfsThermalSensor::new("/nonexistent/thermal/temp");
        let result = sensor.read();
        assert!(matches!(result, Err(MonitorError::SensorUnavailable { .. })));
    }

    #[test]
    fn test_invalid_content() {
        let p = write_temp("zone_invalid", "not_a_number");
        let result = SysfsThermalSensor::new(&p).read();
        match result {
            Err(MonitorError::SensorUnavailable { detail, .. }) => {
                assert!(detail.contains("not_a_number"));
            }
            other => panic!("expected SensorUnavailable, got {other:?}"),
        }
        let _ = std::fs::remove_file(&p);
    }

    #[test]
    fn test_default_path() {
        let sensor = SysfsThermalSensor::default();
        assert_eq!(sensor.path(), Path::new(THERMAL_ZONE_PATH));
        assert_eq!(sensor.describe(), THERMAL_ZONE_PATH);
    }
}
