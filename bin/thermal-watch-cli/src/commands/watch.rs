// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `thermal-watch watch` command: the temperature-guarded host loop.
//!
//! Each iteration:
//! ```text
//! infer ─► update (recorded) ─► now (safety check) ─► overlay ─► exit?
//! ```
//! `update` and `now` are two separate sensor reads, so the reading that
//! decides safety is not the one stored in the history for that
//! iteration.

use super::perception::HeadlessPerception;
use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;
use thermal_monitor::overlay::{overlay_lines, Perception};
use thermal_monitor::{
    is_safe_with, MonitorConfig, MonitorError, Reading, SensorReader, TemperatureSession,
};
use tokio::time::MissedTickBehavior;

/// Output switches for the watch loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct WatchOptions {
    /// Print the overlay block every iteration.
    pub show_overlay: bool,
    /// Emit the final summary as JSON.
    pub json: bool,
}

/// Why the loop ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitReason {
    Overheated,
    Interrupted,
    IterationLimit,
}

/// How a completed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LoopOutcome {
    reason: ExitReason,
    iterations: u64,
}

pub async fn execute(config: MonitorConfig, options: WatchOptions) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║          thermal-watch · Temperature Guard          ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("  Sensor:    {}", config.sensor_path.display());
    println!("  Threshold: {:.1} C", config.max_safe_celsius);
    println!("  Interval:  {} ms", config.interval_ms);
    if let Some(n) = config.max_iterations {
        println!("  Limit:     {n} iterations");
    }
    println!();

    let session = Arc::new(TemperatureSession::new(config.create_sensor()));
    let mut perception = HeadlessPerception::default();

    let started = Instant::now();
    let outcome = monitor(&session, &mut perception, &config, options).await?;
    tracing::info!(reason = ?outcome.reason, iterations = outcome.iterations, "monitoring loop finished");

    let elapsed = started.elapsed().as_secs_f64();
    println!("elapsed time: {elapsed:.2}");
    println!("approx. FPS: {:.2}", approx_fps(outcome.iterations, elapsed));

    if options.json {
        let summary = session
            .summary_data()
            .context("no readings were recorded")?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let report = session.summary().context("no readings were recorded")?;
        println!("{report}");
    }

    println!("Program Ending");
    Ok(())
}

/// Starts the session, runs the loop, and stops the session on every
/// exit path, including errors.
async fn monitor<S: SensorReader + 'static>(
    session: &Arc<TemperatureSession<S>>,
    perception: &mut impl Perception,
    config: &MonitorConfig,
    options: WatchOptions,
) -> anyhow::Result<LoopOutcome> {
    session.start();
    let outcome = run_loop(session, perception, config, options).await;
    session.stop();
    outcome
}

async fn run_loop<S: SensorReader + 'static>(
    session: &Arc<TemperatureSession<S>>,
    perception: &mut impl Perception,
    config: &MonitorConfig,
    options: WatchOptions,
) -> anyhow::Result<LoopOutcome> {
    let mut ticker = tokio::time::interval(config.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut iterations: u64 = 0;

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("interrupt received");
                return Ok(LoopOutcome {
                    reason: ExitReason::Interrupted,
                    iterations,
                });
            }
            _ = ticker.tick() => {}
        }

        let results = perception.infer();

        let s = Arc::clone(session);
        let sampled = tokio::task::spawn_blocking(move || -> Result<Reading, MonitorError> {
            s.update()?;
            s.now()
        })
        .await
        .context("sensor task panicked")?;

        let now = sampled.map_err(|e| {
            anyhow::Error::new(e).context(format!(
                "temperature monitoring aborted after {iterations} iterations"
            ))
        })?;
        iterations += 1;

        let text = overlay_lines(
            perception.model_id(),
            &results,
            &now,
            config.max_safe_celsius,
        );
        if options.show_overlay {
            for line in &text {
                println!("  {line}");
            }
        } else {
            tracing::debug!(iteration = iterations, celsius = now.temperature_celsius, "sampled");
        }

        if !is_safe_with(&now, config.max_safe_celsius) {
            tracing::warn!(
                celsius = now.temperature_celsius,
                threshold = config.max_safe_celsius,
                "safety threshold reached"
            );
            println!("MAXIMUM SAFE TEMPERATURE REACHED. Powering down application.");
            return Ok(LoopOutcome {
                reason: ExitReason::Overheated,
                iterations,
            });
        }

        if config.max_iterations.is_some_and(|max| iterations >= max) {
            return Ok(LoopOutcome {
                reason: ExitReason::IterationLimit,
                iterations,
            });
        }
    }
}

/// Iterations per second over the whole run.
fn approx_fps(iterations: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    iterations as f64 / elapsed_secs
}
