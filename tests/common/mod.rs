// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use run_tracker::config::EngineConfig;
use run_tracker::models::{GeoPoint, LocationFix};
use run_tracker::services::{Clock, ManualClock, RunTracker};
use std::sync::Arc;

/// Seoul City Hall, used as the origin of synthetic runs.
#[allow(dead_code)]
pub const ORIGIN: GeoPoint = GeoPoint::new(37.5665, 126.9780);

/// Meters per degree of latitude on the tracker's Earth sphere.
#[allow(dead_code)]
pub const METERS_PER_DEG_LAT: f64 = 111_194.93;

/// Fixed start time for deterministic runs.
#[allow(dead_code)]
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 6, 30, 0).unwrap()
}

/// Point `north_m` meters due north of the origin.
#[allow(dead_code)]
pub fn north_of_origin(north_m: f64) -> GeoPoint {
    GeoPoint::new(ORIGIN.lat + north_m / METERS_PER_DEG_LAT, ORIGIN.lng)
}

/// Good-quality fix `north_m` meters north of the origin, observed at the clock's now.
#[allow(dead_code)]
pub fn fix_north(clock: &ManualClock, north_m: f64) -> LocationFix {
    LocationFix::new(north_of_origin(north_m), 10.0, clock.now())
}

/// Idle tracker on a manual clock starting at `t0()`.
#[allow(dead_code)]
pub fn manual_tracker() -> (RunTracker, Arc<ManualClock>) {
    manual_tracker_with(EngineConfig::default())
}

#[allow(dead_code)]
pub fn manual_tracker_with(config: EngineConfig) -> (RunTracker, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(t0()));
    let tracker = RunTracker::with_clock(&config, clock.clone());
    (tracker, clock)
}

/// Advance the clock one second per tick, like the 1 Hz timer would.
#[allow(dead_code)]
pub fn run_seconds(tracker: &mut RunTracker, clock: &ManualClock, secs: u32) {
    for _ in 0..secs {
        clock.advance(TimeDelta::seconds(1));
        tracker.tick();
    }
}
