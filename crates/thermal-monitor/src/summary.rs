// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Session summary and the human-readable report.
//!
//! # Report layout
//! ```text
//! The temperature tracker was started at: 2025-06-01 09:00:00
//! A total of 2 have been gathered
//! The readings so far are:
//! 		40.00C/104.00F at time 2025-06-01 09:00:01
//! 		85.00C/185.00F at time 2025-06-01 09:00:02
//! The average temperature was: 62.50C/144.50F
//! The maximum temperature was: 85.00C/185.00F
//! The minimum temperature was: 40.00C/104.00F
//! The temperature tracker was stopped at time: 2025-06-01 09:00:03
//! ```
//! Every line ends in `\n`; the line announcing the readings carries a
//! trailing space before its newline.

use crate::reading::{dual_scale, format_timestamp};
use crate::stats::{average_of, count_of, maximum_of, minimum_of};
use crate::{MonitorError, Reading};
use chrono::{DateTime, Local};
use std::fmt;

/// Returned by [`TemperatureSession::summary`](crate::TemperatureSession::summary)
/// before `start` has been called.
pub const NOT_STARTED_MESSAGE: &str = "The temperature tracker has not yet been started";

/// Aggregate statistics for one session.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SessionSummary {
    /// Mean temperature (°C).
    pub average: f64,
    /// Lowest temperature (°C), first occurrence.
    pub minimum: f64,
    /// Highest temperature (°C), first occurrence.
    pub maximum: f64,
    /// Number of recorded readings.
    pub count: usize,
    /// When the session was started, if it was.
    pub started_at: Option<DateTime<Local>>,
    /// When the session was stopped, if it was.
    pub stopped_at: Option<DateTime<Local>>,
}

impl SessionSummary {
    /// Computes the summary for a history.
    ///
    /// Fails with [`MonitorError::EmptyHistory`] if `history` is empty.
    pub fn compute(
        history: &[Reading],
        started_at: Option<DateTime<Local>>,
        stopped_at: Option<DateTime<Local>>,
    ) -> Result<Self, MonitorError> {
        Ok(Self {
            average: average_of(history)?,
            minimum: minimum_of(history)?.temperature_celsius,
            maximum: maximum_of(history)?.temperature_celsius,
            count: count_of(history)?,
            started_at,
            stopped_at,
        })
    }

    /// Renders the report for this summary and the readings it was
    /// computed from.
    pub fn render(&self, history: &[Reading]) -> String {
        self.report(history).to_string()
    }

    /// A displayable view of the report, borrowing the readings.
    pub fn report<'a>(&'a self, history: &'a [Reading]) -> Report<'a> {
        Report {
            summary: self,
            history,
        }
    }
}

/// The end-of-run report; formats through [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    summary: &'a SessionSummary,
    history: &'a [Reading],
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        let Some(started_at) = s.started_at else {
            return f.write_str(NOT_STARTED_MESSAGE);
        };

        writeln!(
            f,
            "The temperature tracker was started at: {}",
            format_timestamp(&started_at)
        )?;
        writeln!(f, "A total of {} have been gathered", s.count)?;
        writeln!(f, "The readings so far are: ")?;
        for reading in self.history {
            writeln!(f, "\t\t{reading}")?;
        }
        writeln!(f, "The average temperature was: {}", dual_scale(s.average))?;
        writeln!(f, "The maximum temperature was: {}", dual_scale(s.maximum))?;
        writeln!(f, "The minimum temperature was: {}", dual_scale(s.minimum))?;
        match s.stopped_at {
            Some(stopped_at) => writeln!(
                f,
                "The temperature tracker was stopped at time: {}",
                format_timestamp(&stopped_at)
            ),
            None => writeln!(f, "The temperature tracker is still on."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 9, 0, s).single().unwrap()
    }

    fn history() -> Vec<Reading> {
        vec![Reading::new(40.0, at(1)), Reading::new(85.0, at(2))]
    }

    #[test]
    fn test_compute() {
        let s = SessionSummary::compute(&history(), Some(at(0)), None).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.minimum, 40.0);
        assert_eq!(s.maximum, 85.0);
        assert!((s.average - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_compute_empty_fails() {
        let result = SessionSummary::compute(&[], Some(at(0)), None);
        assert!(matches!(result, Err(MonitorError::EmptyHistory)));
    }

    #[test]
    fn test_render_stopped() {
        let h = history();
        let s = SessionSummary::compute(&h, Some(at(0)), Some(at(3))).unwrap();
        let expected = "The temperature tracker was started at: 2025-06-01 09:00:00\n\
A total of 2 have been gathered\n\
The readings so far are: \n\
\t\t40.00C/104.00F at time 2025-06-01 09:00:01\n\
\t\t85.00C/185.00F at time 2025-06-01 09:00:02\n\
The average temperature was: 62.50C/144.50F\n\
The maximum temperature was: 85.00C/185.00F\n\
The minimum temperature was: 40.00C/104.00F\n\
The temperature tracker was stopped at time: 2025-06-01 09:00:03\n";
        assert_eq!(s.render(&h), expected);
    }

    #[test]
    fn test_report_display_matches_render() {
        let h = history();
        let s = SessionSummary::compute(&h, Some(at(0)), Some(at(3))).unwrap();
        assert_eq!(format!("{}", s.report(&h)), s.render(&h));
        assert_eq!(s.report(&h).to_string().lines().count(), 9);
    }

    #[test]
    fn test_render_still_on() {
        let h = history();
        let s = SessionSummary::compute(&h, Some(at(0)), None).unwrap();
        assert!(s.render(&h).ends_with("The temperature tracker is still on.\n"));
    }

    #[test]
    fn test_render_not_started() {
        let h = history();
        let s = SessionSummary::compute(&h, None, None).unwrap();
        assert_eq!(s.render(&h), NOT_STARTED_MESSAGE);
    }

    #[test]
    fn test_serialize() {
        let s = SessionSummary::compute(&history(), Some(at(0)), None).unwrap();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["maximum"], 85.0);
        assert!(json["stopped_at"].is_null());
    }
}
