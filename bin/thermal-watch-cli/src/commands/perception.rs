// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Stand-in perception pipeline used when no vision model is attached.

use std::time::Instant;
use thermal_monitor::overlay::{InferenceResults, Perception};

/// Reports no detections; the loop still produces the temperature lines
/// of the overlay.
#[derive(Debug)]
pub struct HeadlessPerception {
    model_id: String,
}

impl Default for HeadlessPerception {
    fn default() -> Self {
        Self {
            model_id: "none (headless)".to_string(),
        }
    }
}

impl Perception for HeadlessPerception {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn infer(&mut self) -> InferenceResults {
        let start = Instant::now();
        InferenceResults {
            duration: start.elapsed(),
            predictions: Vec::new(),
        }
    }
}
