// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Statistics over a slice of readings.
//!
//! Every function performs a full scan; nothing is cached between calls.
//! All of them fail with [`MonitorError::EmptyHistory`] on an empty slice.

use crate::{MonitorError, Reading};

/// Returns the first reading with the lowest temperature.
///
/// Uses a strict `<` scan, so the earliest reading wins on ties.
pub fn minimum_of(readings: &[Reading]) -> Result<Reading, MonitorError> {
    extremum_by(readings, |candidate, best| candidate < best)
}

/// Returns the first reading with the highest temperature.
///
/// Uses a strict `>` scan, so the earliest reading wins on ties.
pub fn maximum_of(readings: &[Reading]) -> Result<Reading, MonitorError> {
    extremum_by(readings, |candidate, best| candidate > best)
}

/// Arithmetic mean of all temperatures.
pub fn average_of(readings: &[Reading]) -> Result<f64, MonitorError> {
    let count = count_of(readings)?;
    let total: f64 = readings.iter().map(|r| r.temperature_celsius).sum();
    Ok(total / count as f64)
}

/// Number of readings.
pub fn count_of(readings: &[Reading]) -> Result<usize, MonitorError> {
    if readings.is_empty() {
        return Err(MonitorError::EmptyHistory);
    }
    Ok(readings.len())
}

fn extremum_by(
    readings: &[Reading],
    replaces: impl Fn(f64, f64) -> bool,
) -> Result<Reading, MonitorError> {
    let (first, rest) = readings.split_first().ok_or(MonitorError::EmptyHistory)?;
    let mut best = *first;
    for reading in rest {
        if replaces(reading.temperature_celsius, best.temperature_celsius) {
            best = *reading;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    fn readings(temps: &[f64]) -> Vec<Reading> {
        let base = Local::now();
        temps
            .iter()
            .enumerate()
            .map(|(i, t)| Reading::new(*t, base + Duration::seconds(i as i64)))
            .collect()
    }

    #[test]
    fn test_empty_history_fails() {
        assert!(matches!(minimum_of(&[]), Err(MonitorError::EmptyHistory)));
        assert!(matches!(maximum_of(&[]), Err(MonitorError::EmptyHistory)));
        assert!(matches!(average_of(&[]), Err(MonitorError::EmptyHistory)));
        assert!(matches!(count_of(&[]), Err(MonitorError::EmptyHistory)));
    }

    #[test]
    fn test_basic_stats() {
        let r = readings(&[55.0, 41.5, 70.25, 60.0]);
        assert_eq!(minimum_of(&r).unwrap().temperature_celsius, 41.5);
        assert_eq!(maximum_of(&r).unwrap().temperature_celsius, 70.25);
        assert!((average_of(&r).unwrap() - 56.6875).abs() < 1e-9);
        assert_eq!(count_of(&r).unwrap(), 4);
    }

    #[test]
    fn test_ties_resolve_to_earliest() {
        let r = readings(&[20.0, 20.0]);
        assert_eq!(minimum_of(&r).unwrap().timestamp, r[0].timestamp);
        assert_eq!(maximum_of(&r).unwrap().timestamp, r[0].timestamp);
    }

    #[test]
    fn test_ties_after_first() {
        let r = readings(&[50.0, 30.0, 70.0, 30.0, 70.0]);
        assert_eq!(minimum_of(&r).unwrap().timestamp, r[1].timestamp);
        assert_eq!(maximum_of(&r).unwrap().timestamp, r[2].timestamp);
    }

    #[test]
    fn test_bounds_hold_for_every_reading() {
        let r = readings(&[48.2, 51.9, 47.0, 63.3, 59.1, 47.0, 63.3]);
        let min = minimum_of(&r).unwrap().temperature_celsius;
        let max = maximum_of(&r).unwrap().temperature_celsius;
        for reading in &r {
            assert!(min <= reading.temperature_celsius);
            assert!(reading.temperature_celsius <= max);
        }
    }

    #[test]
    fn test_single_reading() {
        let r = readings(&[42.0]);
        assert_eq!(minimum_of(&r).unwrap(), r[0]);
        assert_eq!(maximum_of(&r).unwrap(), r[0]);
        assert_eq!(average_of(&r).unwrap(), 42.0);
    }
}
