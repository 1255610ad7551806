// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # thermal-monitor
//!
//! Runtime temperature monitoring for edge devices such as the
//! Raspberry Pi 4. A host control loop samples the SoC thermal sensor
//! once per iteration, keeps a timestamped history, and asks whether it is
//! still safe to keep running.
//!
//! # Key Components
//!
//! - [`SensorReader`]: the injected sensor capability. [`SysfsThermalSensor`]
//!   reads `/sys/class/thermal/thermal_zone0/temp`; [`TimeoutSensor`] bounds
//!   a read that could hang; [`ScriptedSensor`] replays fixed values.
//! - [`TemperatureSession`]: owns the history and the start/stop
//!   timestamps, computes minimum/maximum/average/count by full scan, and
//!   renders the end-of-run report.
//! - [`SessionSummary`]: the statistics as a typed value.
//! - [`overlay`]: the per-iteration text block shown next to the video.
//! - [`MonitorConfig`]: TOML configuration for the host loop.
//!
//! # Example
//! ```
//! use thermal_monitor::{ScriptedSensor, TemperatureSession};
//!
//! let session = TemperatureSession::new(ScriptedSensor::from_celsius([40.0, 85.0]));
//! session.start();
//! session.update().unwrap();
//! let latest = session.update().unwrap();
//!
//! assert_eq!(session.count().unwrap(), 2);
//! assert_eq!(session.average().unwrap(), 62.5);
//! assert!(!session.is_safe(&latest));
//! ```

mod config;
mod error;
pub mod overlay;
mod reading;
mod sensor;
mod session;
pub mod stats;
mod summary;
mod thermal;

pub use config::MonitorConfig;
pub use error::MonitorError;
pub use reading::{celsius_to_fahrenheit, dual_scale, format_timestamp, Reading, TIMESTAMP_FORMAT};
pub use sensor::{ScriptedSensor, SensorReader, TimeoutSensor};
pub use session::{is_safe_with, SessionPhase, TemperatureSession};
pub use summary::{Report, SessionSummary, NOT_STARTED_MESSAGE};
pub use thermal::{SysfsThermalSensor, MAX_SAFE_TEMP_RPI4, THERMAL_ZONE_PATH};
