// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run-Tracker trace replay
//!
//! Replays a JSON array of location fixes through the tracking engine and
//! prints the finished run record, as it would be handed to storage.

use anyhow::Context;
use run_tracker::time_utils::{format_duration, format_pace};
use run_tracker::{config::EngineConfig, models::RunRecord, services::replay, LocationFix};
use std::{env, fs};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    let path = env::args()
        .nth(1)
        .context("Usage: run-tracker <fixes.json>")?;

    // Load configuration from environment
    let config = EngineConfig::from_env().context("Failed to load configuration")?;
    let user_id = env::var("RUN_USER_ID").unwrap_or_else(|_| "local".to_string());

    let data = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
    let fixes: Vec<LocationFix> =
        serde_json::from_str(&data).with_context(|| format!("Failed to parse {}", path))?;
    tracing::info!(path = %path, fixes = fixes.len(), "Replaying run");

    let snapshot = replay::replay_fixes(&config, &fixes)
        .with_context(|| format!("No fixes in {}", path))?;
    tracing::info!(
        distance_m = snapshot.distance_m,
        duration = %format_duration(snapshot.duration_s),
        pace = %format_pace(snapshot.pace_s_per_km),
        "Run finished"
    );
    let record = RunRecord::from_snapshot(&snapshot, user_id)?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("run_tracker=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(format)
        .init();
}
