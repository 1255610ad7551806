// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The temperature-monitoring session.
//!
//! A [`TemperatureSession`] owns the chronological history of readings and
//! the start/stop timestamps. A single mutex guards all three, so the
//! session can be shared (e.g., behind an `Arc`) between a poller and a
//! consumer that asks for the summary.
//!
//! # Lifecycle
//! ```text
//! Uninitialized ──start()──► Started ──stop()──► Stopped
//! ```
//! `update`/`now` are accepted in any phase; the report only covers a
//! session that has been started.

use crate::stats::{average_of, count_of, maximum_of, minimum_of};
use crate::summary::{SessionSummary, NOT_STARTED_MESSAGE};
use crate::thermal::MAX_SAFE_TEMP_RPI4;
use crate::{MonitorError, Reading, SensorReader};
use chrono::{DateTime, Local};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SessionPhase {
    /// `start` has not been called.
    Uninitialized,
    /// Started and not yet stopped.
    Started,
    /// `stop` has been called.
    Stopped,
}

#[derive(Debug, Default)]
struct SessionState {
    history: Vec<Reading>,
    started_at: Option<DateTime<Local>>,
    stopped_at: Option<DateTime<Local>>,
}

/// Records readings from an injected [`SensorReader`] and summarises them.
///
/// Each session allocates its own history; nothing is shared between
/// instances.
#[derive(Debug)]
pub struct TemperatureSession<S> {
    sensor: S,
    state: Mutex<SessionState>,
}

impl<S: SensorReader> TemperatureSession<S> {
    /// Creates an empty, unstarted session reading from `sensor`.
    pub fn new(sensor: S) -> Self {
        Self {
            sensor,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// The sensor this session samples.
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Marks the session as started.
    ///
    /// Precondition: call exactly once per session. A second call replaces
    /// the start time with the later instant and logs a warning.
    pub fn start(&self) {
        let now = Local::now();
        let mut state = self.state();
        if let Some(previous) = state.started_at.replace(now) {
            tracing::warn!(%previous, "session started twice; start time overwritten");
        }
        tracing::info!(sensor = %self.sensor.describe(), "temperature session started");
    }

    /// Marks the session as stopped.
    ///
    /// Same single-call precondition as [`start`](Self::start).
    pub fn stop(&self) {
        let now = Local::now();
        let mut state = self.state();
        if let Some(previous) = state.stopped_at.replace(now) {
            tracing::warn!(%previous, "session stopped twice; stop time overwritten");
        }
        tracing::info!(readings = state.history.len(), "temperature session stopped");
    }

    /// Takes one sample and appends it to the history.
    ///
    /// A sensor failure is returned unchanged and the history is left
    /// untouched.
    pub fn update(&self) -> Result<Reading, MonitorError> {
        let reading = self.sensor.read()?;
        self.record(reading);
        Ok(reading)
    }

    /// Appends a reading obtained elsewhere.
    ///
    /// Lets a host record the exact sample it used for a safety decision
    /// instead of taking a second one with [`update`](Self::update).
    pub fn record(&self, reading: Reading) {
        let mut state = self.state();
        state.history.push(reading);
        tracing::debug!(
            celsius = reading.temperature_celsius,
            count = state.history.len(),
            "reading recorded"
        );
    }

    /// Takes one sample without recording it.
    ///
    /// This is a separate sensor query from any `update` in the same
    /// iteration, so the two readings may differ.
    pub fn now(&self) -> Result<Reading, MonitorError> {
        self.sensor.read()
    }

    /// Lowest recorded temperature (earliest occurrence on ties).
    pub fn minimum(&self) -> Result<f64, MonitorError> {
        Ok(self.minimum_reading()?.temperature_celsius)
    }

    /// Highest recorded temperature (earliest occurrence on ties).
    pub fn maximum(&self) -> Result<f64, MonitorError> {
        Ok(self.maximum_reading()?.temperature_celsius)
    }

    /// The reading holding the lowest temperature.
    pub fn minimum_reading(&self) -> Result<Reading, MonitorError> {
        minimum_of(&self.state().history)
    }

    /// The reading holding the highest temperature.
    pub fn maximum_reading(&self) -> Result<Reading, MonitorError> {
        maximum_of(&self.state().history)
    }

    /// Mean of all recorded temperatures.
    pub fn average(&self) -> Result<f64, MonitorError> {
        average_of(&self.state().history)
    }

    /// Number of recorded readings. Fails on an empty history.
    pub fn count(&self) -> Result<usize, MonitorError> {
        count_of(&self.state().history)
    }

    /// Number of recorded readings, zero when empty.
    pub fn len(&self) -> usize {
        self.state().history.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.state().history.is_empty()
    }

    /// A copy of the history in chronological order.
    pub fn history(&self) -> Vec<Reading> {
        self.state().history.clone()
    }

    /// When [`start`](Self::start) was last called.
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.state().started_at
    }

    /// When [`stop`](Self::stop) was last called.
    pub fn stopped_at(&self) -> Option<DateTime<Local>> {
        self.state().stopped_at
    }

    /// Current lifecycle phase.
    ///
    /// A `stop` without a prior `start` leaves the session uninitialized.
    pub fn phase(&self) -> SessionPhase {
        let state = self.state();
        match (state.started_at, state.stopped_at) {
            (None, _) => SessionPhase::Uninitialized,
            (Some(_), None) => SessionPhase::Started,
            (Some(_), Some(_)) => SessionPhase::Stopped,
        }
    }

    /// Statistics and timestamps as one value.
    pub fn summary_data(&self) -> Result<SessionSummary, MonitorError> {
        let state = self.state();
        SessionSummary::compute(&state.history, state.started_at, state.stopped_at)
    }

    /// The human-readable report.
    ///
    /// Returns [`NOT_STARTED_MESSAGE`] if the session was never started,
    /// whatever the history holds. Otherwise fails with
    /// [`MonitorError::EmptyHistory`] when no readings exist.
    pub fn summary(&self) -> Result<String, MonitorError> {
        let state = self.state();
        if state.started_at.is_none() {
            return Ok(NOT_STARTED_MESSAGE.to_string());
        }
        let summary =
            SessionSummary::compute(&state.history, state.started_at, state.stopped_at)?;
        Ok(summary.render(&state.history))
    }

    /// Returns `true` if `reading` is below the RPi 4 safety threshold.
    pub fn is_safe(&self, reading: &Reading) -> bool {
        is_safe_with(reading, MAX_SAFE_TEMP_RPI4)
    }

    // The state is append-only, so a panic in another holder cannot leave
    // it half-written.
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns `true` if `reading` is strictly below `threshold_celsius`.
pub fn is_safe_with(reading: &Reading, threshold_celsius: f64) -> bool {
    reading.temperature_celsius < threshold_celsius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSensor;

    #[test]
    fn test_new_session_is_empty() {
        let s = TemperatureSession::new(ScriptedSensor::new());
        assert!(s.is_empty());
        assert_eq!(s.phase(), SessionPhase::Uninitialized);
        assert!(matches!(s.count(), Err(MonitorError::EmptyHistory)));
        assert!(matches!(s.minimum(), Err(MonitorError::EmptyHistory)));
        assert!(matches!(s.maximum(), Err(MonitorError::EmptyHistory)));
        assert!(matches!(s.average(), Err(MonitorError::EmptyHistory)));
    }

    #[test]
    fn test_phase_transitions() {
        let s = TemperatureSession::new(ScriptedSensor::new());
        s.start();
        assert_eq!(s.phase(), SessionPhase::Started);
        assert!(s.started_at().is_some());
        s.stop();
        assert_eq!(s.phase(), SessionPhase::Stopped);
        assert!(s.stopped_at().unwrap() >= s.started_at().unwrap());
    }

    #[test]
    fn test_stop_without_start_stays_uninitialized() {
        let s = TemperatureSession::new(ScriptedSensor::from_celsius([40.0]));
        s.update().unwrap();
        s.stop();
        assert_eq!(s.phase(), SessionPhase::Uninitialized);
        assert_eq!(s.summary().unwrap(), NOT_STARTED_MESSAGE);
        s.start();
        assert_eq!(s.phase(), SessionPhase::Stopped);
    }

    #[test]
    fn test_second_start_overwrites() {
        let s = TemperatureSession::new(ScriptedSensor::new());
        s.start();
        let first = s.started_at().unwrap();
        s.start();
        assert!(s.started_at().unwrap() >= first);
    }

    #[test]
    fn test_update_appends_and_now_does_not() {
        let s = TemperatureSession::new(ScriptedSensor::from_celsius([50.0, 51.0, 52.0]));
        s.update().unwrap();
        let now = s.now().unwrap();
        assert!((now.temperature_celsius - 51.0).abs() < 1e-9);
        assert_eq!(s.count().unwrap(), 1);
        s.update().unwrap();
        assert_eq!(s.count().unwrap(), 2);
        let temps: Vec<f64> = s.history().iter().map(|r| r.temperature_celsius).collect();
        assert_eq!(temps, vec![50.0, 52.0]);
    }

    #[test]
    fn test_update_failure_leaves_history() {
        let s = TemperatureSession::new(ScriptedSensor::from_celsius([45.0]).with_failure("gone"));
        s.update().unwrap();
        let err = s.update().unwrap_err();
        assert!(matches!(err, MonitorError::SensorUnavailable { .. }));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_record_external_reading() {
        let s = TemperatureSession::new(ScriptedSensor::new());
        let r = Reading::now(60.0);
        s.record(r);
        assert_eq!(s.history(), vec![r]);
    }

    #[test]
    fn test_is_safe_threshold() {
        let s = TemperatureSession::new(ScriptedSensor::new());
        assert!(s.is_safe(&Reading::now(81.99)));
        assert!(!s.is_safe(&Reading::now(82.0)));
        assert!(!s.is_safe(&Reading::now(85.0)));
        assert!(is_safe_with(&Reading::now(69.9), 70.0));
        assert!(!is_safe_with(&Reading::now(70.0), 70.0));
    }

    #[test]
    fn test_summary_not_started_wins_over_empty() {
        let s = TemperatureSession::new(ScriptedSensor::new());
        assert_eq!(s.summary().unwrap(), NOT_STARTED_MESSAGE);
    }

    #[test]
    fn test_summary_started_but_empty_fails() {
        let s = TemperatureSession::new(ScriptedSensor::new());
        s.start();
        assert!(matches!(s.summary(), Err(MonitorError::EmptyHistory)));
    }

    #[test]
    fn test_summary_reflects_real_stop() {
        let s = TemperatureSession::new(ScriptedSensor::from_celsius([40.0]));
        s.start();
        s.update().unwrap();
        assert!(s.summary().unwrap().ends_with("The temperature tracker is still on.\n"));
        s.stop();
        let report = s.summary().unwrap();
        assert!(report.contains("The temperature tracker was stopped at time: "));
        assert!(!report.contains("still on"));
    }

    #[test]
    fn test_summary_data() {
        let s = TemperatureSession::new(ScriptedSensor::from_celsius([30.0, 50.0]));
        s.start();
        s.update().unwrap();
        s.update().unwrap();
        let d = s.summary_data().unwrap();
        assert_eq!(d.count, 2);
        assert_eq!(d.minimum, 30.0);
        assert_eq!(d.maximum, 50.0);
        assert_eq!(d.average, 40.0);
        assert!(d.started_at.is_some());
        assert!(d.stopped_at.is_none());
    }
}
