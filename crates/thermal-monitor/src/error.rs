// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for temperature monitoring.

/// Errors that can occur while sampling the sensor or summarising a session.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The thermal sensor could not be queried (missing sysfs node,
    /// permission denied, garbage content, or a read that timed out).
    #[error("thermal sensor unavailable at {path}: {detail}")]
    SensorUnavailable { path: String, detail: String },

    /// A statistic was requested before any reading was recorded.
    #[error("no temperature readings have been recorded")]
    EmptyHistory,

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl MonitorError {
    /// Shorthand for building a [`MonitorError::SensorUnavailable`].
    pub(crate) fn unavailable(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::SensorUnavailable {
            path: path.into(),
            detail: detail.into(),
        }
    }
}
