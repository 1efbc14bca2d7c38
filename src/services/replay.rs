// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Offline replay of a recorded fix trace through the tracker.

use chrono::TimeDelta;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::models::{LocationFix, RunSessionSnapshot};
use crate::services::clock::{Clock, ManualClock};
use crate::services::tracker::RunTracker;

/// Replay `fixes` as one run and return the finished snapshot.
///
/// The clock starts at the earliest fix and ticks once per whole second
/// that elapses before each following fix. Returns `None` for an empty trace.
pub fn replay_fixes(config: &EngineConfig, fixes: &[LocationFix]) -> Option<RunSessionSnapshot> {
    let mut ordered = fixes.to_vec();
    ordered.sort_by_key(|f| f.observed_at);
    let start = ordered.first()?.observed_at;

    let clock = Arc::new(ManualClock::new(start));
    let mut tracker = RunTracker::with_clock(config, clock.clone());
    tracker.start();

    let one_second = TimeDelta::seconds(1);
    for fix in ordered {
        while clock.now() + one_second <= fix.observed_at {
            clock.advance(one_second);
            tracker.tick();
        }
        tracker.ingest_fix(fix);
    }

    let diagnostics = tracker.diagnostics();
    tracing::info!(
        fixes = diagnostics.fixes_received,
        recorded = diagnostics.points_recorded,
        outliers = diagnostics.outliers_rejected,
        rejected = diagnostics.rejected_low_accuracy + diagnostics.rejected_invalid_coordinate,
        "Replay complete"
    );

    Some(tracker.stop())
}
