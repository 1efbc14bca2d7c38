// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run session aggregate and the read-only snapshot handed to consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::location::RecordedPoint;
use crate::services::geo_math;

/// Lifecycle state of a run session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// The mutable run aggregate. Owned and mutated only by the tracker.
///
/// `distance_m` and `duration_s` never decrease between `start()` and
/// `stop()`; `route` is append-only.
#[derive(Debug, Clone, Default)]
pub struct RunSession {
    pub state: SessionState,
    pub distance_m: f64,
    pub duration_s: u64,
    pub route: Vec<RecordedPoint>,
    pub pace_s_per_km: f64,
    pub max_speed_kmh: f64,
    pub cadence_spm: u32,
    pub calories_kcal: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl RunSession {
    /// Zero every field and enter `Running`.
    pub(crate) fn begin(&mut self, now: DateTime<Utc>) {
        *self = RunSession {
            state: SessionState::Running,
            started_at: Some(now),
            ..Default::default()
        };
    }

    /// Last point on the route, if any.
    pub fn last_point(&self) -> Option<&RecordedPoint> {
        self.route.last()
    }

    pub fn snapshot(&self) -> RunSessionSnapshot {
        RunSessionSnapshot {
            state: self.state,
            distance_m: self.distance_m,
            duration_s: self.duration_s,
            pace_s_per_km: self.pace_s_per_km,
            avg_speed_kmh: geo_math::avg_speed_kmh(self.distance_m, self.duration_s),
            max_speed_kmh: self.max_speed_kmh,
            cadence_spm: self.cadence_spm,
            calories_kcal: self.calories_kcal,
            started_at: self.started_at,
            ended_at: self.ended_at,
            route: self.route.clone(),
        }
    }
}

/// Read-only copy of a run session for rendering and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunSessionSnapshot {
    pub state: SessionState,
    pub distance_m: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration_s: u64,
    pub pace_s_per_km: f64,
    pub avg_speed_kmh: f64,
    pub max_speed_kmh: f64,
    pub cadence_spm: u32,
    pub calories_kcal: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub route: Vec<RecordedPoint>,
}

impl RunSessionSnapshot {
    /// Route as a geo line string (x = longitude, y = latitude).
    pub fn to_line_string(&self) -> geo::LineString<f64> {
        self.route
            .iter()
            .map(|p| geo::Coord::from(p.point))
            .collect()
    }
}

/// Per-session counters for filtered input, for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub fixes_received: u64,
    pub rejected_low_accuracy: u64,
    pub rejected_invalid_coordinate: u64,
    /// Fixes that arrived while the session was not running
    pub ignored_inactive: u64,
    pub points_recorded: u64,
    pub outliers_rejected: u64,
    pub ticks_applied: u64,
}
