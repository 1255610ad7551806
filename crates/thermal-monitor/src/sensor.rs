// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The sensor capability injected into a [`TemperatureSession`](crate::TemperatureSession).
//!
//! - [`SensorReader`]: one fresh [`Reading`] per call.
//! - [`TimeoutSensor`]: bounds every read of an inner sensor by a deadline.
//! - [`ScriptedSensor`]: replays a fixed sequence of temperatures or
//!   failures, for tests and recorded traces.

use crate::{MonitorError, Reading};
use std::collections::VecDeque;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A source of temperature readings.
///
/// Implementations must return a fresh sample stamped with the current
/// instant on every call. A sensor that cannot be queried returns
/// [`MonitorError::SensorUnavailable`]; it must never substitute a
/// placeholder temperature.
pub trait SensorReader: Send + Sync {
    /// Takes one sample.
    fn read(&self) -> Result<Reading, MonitorError>;

    /// Human-readable location of the sensor, used in error messages.
    fn describe(&self) -> String {
        "<sensor>".to_string()
    }
}

impl<S: SensorReader + ?Sized> SensorReader for Arc<S> {
    fn read(&self) -> Result<Reading, MonitorError> {
        (**self).read()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: SensorReader + ?Sized> SensorReader for Box<S> {
    fn read(&self) -> Result<Reading, MonitorError> {
        (**self).read()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Wraps a sensor whose interface may hang and bounds each read.
///
/// The inner read runs on a short-lived helper thread. If it does not
/// answer within the timeout the caller gets `SensorUnavailable`; the
/// helper thread is left to finish on its own since sysfs reads cannot be
/// cancelled.
#[derive(Debug, Clone)]
pub struct TimeoutSensor<S> {
    inner: Arc<S>,
    timeout: Duration,
}

impl<S: SensorReader + 'static> TimeoutSensor<S> {
    /// Wraps `inner` with the given per-read deadline.
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }

    /// The per-read deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<S: SensorReader + 'static> SensorReader for TimeoutSensor<S> {
    fn read(&self) -> Result<Reading, MonitorError> {
        let (tx, rx) = mpsc::sync_channel(1);
        let inner = Arc::clone(&self.inner);

        std::thread::Builder::new()
            .name("thermal-read".into())
            .spawn(move || {
                // The receiver may already be gone after a timeout.
                let _ = tx.send(inner.read());
            })
            .map_err(|e| MonitorError::unavailable(self.describe(), e.to_string()))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    sensor = %self.describe(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "sensor read timed out"
                );
                Err(MonitorError::unavailable(
                    self.describe(),
                    format!("read timed out after {} ms", self.timeout.as_millis()),
                ))
            }
            Err(RecvTimeoutError::Disconnected) => Err(MonitorError::unavailable(
                self.describe(),
                "sensor thread exited without a result",
            )),
        }
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

#[derive(Debug, Clone)]
enum Step {
    Celsius(f64),
    Reading(Reading),
    Fail(String),
}

/// Replays a scripted sequence of samples.
///
/// Temperatures queued with [`with_celsius`](Self::with_celsius) are stamped
/// at read time; [`with_reading`](Self::with_reading) replays an exact
/// timestamp. Once the script is exhausted every read fails.
#[derive(Debug, Default)]
pub struct ScriptedSensor {
    steps: Mutex<VecDeque<Step>>,
}

impl ScriptedSensor {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a script from a list of temperatures.
    pub fn from_celsius(temps: impl IntoIterator<Item = f64>) -> Self {
        temps.into_iter().fold(Self::new(), Self::with_celsius)
    }

    /// Queues a temperature that will be stamped when read.
    pub fn with_celsius(self, celsius: f64) -> Self {
        self.push(Step::Celsius(celsius));
        self
    }

    /// Queues an exact reading.
    pub fn with_reading(self, reading: Reading) -> Self {
        self.push(Step::Reading(reading));
        self
    }

    /// Queues a failed read.
    pub fn with_failure(self, detail: impl Into<String>) -> Self {
        self.push(Step::Fail(detail.into()));
        self
    }

    /// Number of queued steps not yet consumed.
    pub fn remaining(&self) -> usize {
        self.steps().len()
    }

    fn push(&self, step: Step) {
        self.steps().push_back(step);
    }

    fn steps(&self) -> std::sync::MutexGuard<'_, VecDeque<Step>> {
        self.steps.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SensorReader for ScriptedSensor {
    fn read(&self) -> Result<Reading, MonitorError> {
        match self.steps().pop_front() {
            Some(Step::Celsius(c)) => Ok(Reading::now(c)),
            Some(Step::Reading(r)) => Ok(r),
            Some(Step::Fail(detail)) => Err(MonitorError::unavailable(self.describe(), detail)),
            None => Err(MonitorError::unavailable(self.describe(), "script exhausted")),
        }
    }

    fn describe(&self) -> String {
        "<scripted>".to_string()
    }
}
