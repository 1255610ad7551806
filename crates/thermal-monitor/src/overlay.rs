// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-iteration text block shown next to the video stream.
//!
//! The perception subsystem (model, camera, streamer) lives outside this
//! crate. It hands over an [`InferenceResults`] each iteration through the
//! [`Perception`] trait; this module only turns those results plus the
//! current temperature into lines of text.

use crate::session::is_safe_with;
use crate::Reading;
use std::time::Duration;

/// Shown when the reading is below the threshold.
pub const SAFE_MESSAGE: &str = "Temperature is safe";

/// Shown when the reading is at or above the threshold.
pub const UNSAFE_MESSAGE: &str = "TEMPERATURE IS NO LONGER SAFE";

/// One detected object.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Detection {
    /// Class label, e.g. `"person"`.
    pub label: String,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f64,
}

/// Output of one inference pass.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct InferenceResults {
    /// Wall-clock time the inference took.
    pub duration: Duration,
    /// Detections above the confidence cutoff.
    pub predictions: Vec<Detection>,
}

/// The external perception subsystem as seen by the host loop.
pub trait Perception {
    /// Identifier of the loaded model.
    fn model_id(&self) -> &str;

    /// Runs inference on the next frame.
    fn infer(&mut self) -> InferenceResults;
}

/// Builds the text block for one iteration.
///
/// ```text
/// Model: <id>
/// Inference time: 0.042 s
/// Objects:
/// person: 87.50%
///
/// 54.32C/129.78F at time 2025-06-01 12:00:00\n
/// Temperature is safe
/// ```
pub fn overlay_lines(
    model_id: &str,
    results: &InferenceResults,
    reading: &Reading,
    threshold_celsius: f64,
) -> Vec<String> {
    let mut text = Vec::with_capacity(results.predictions.len() + 6);
    text.push(format!("Model: {model_id}"));
    text.push(format!(
        "Inference time: {:1.3} s",
        results.duration.as_secs_f64()
    ));
    text.push("Objects:".to_string());
    for p in &results.predictions {
        text.push(format!("{}: {:2.2}%", p.label, p.confidence * 100.0));
    }
    text.push(String::new());
    text.push(format!("{reading}\n"));
    text.push(safety_message(reading, threshold_celsius).to_string());
    text
}

/// [`SAFE_MESSAGE`] or [`UNSAFE_MESSAGE`] for a reading.
pub fn safety_message(reading: &Reading, threshold_celsius: f64) -> &'static str {
    if is_safe_with(reading, threshold_celsius) {
        SAFE_MESSAGE
    } else {
        UNSAFE_MESSAGE
    }
}
