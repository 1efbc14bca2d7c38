// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Finished-run record in the shape consumed by the storage/sync layer.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::location::RecordedPoint;
use super::session::{RunSessionSnapshot, SessionState};
use crate::error::TrackerError;
use crate::time_utils::format_utc_rfc3339;

/// Precision used for the encoded route (same as Strava summary polylines).
pub const POLYLINE_PRECISION: u32 = 5;

/// Persisted run, built from the snapshot returned by `stop()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunRecord {
    pub user_id: String,
    /// Meters
    pub distance: f64,
    /// Seconds
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration: u64,
    /// Seconds per kilometer
    pub avg_pace: f64,
    /// km/h
    pub max_speed: f64,
    pub calories: u32,
    pub cadence: u32,
    /// RFC 3339, UTC
    pub start_time: String,
    /// RFC 3339, UTC
    pub end_time: String,
    pub route: Vec<RecordedPoint>,
    pub route_polyline: String,
}

impl RunRecord {
    /// Build the record for a finished session.
    pub fn from_snapshot(
        snapshot: &RunSessionSnapshot,
        user_id: impl Into<String>,
    ) -> Result<Self, TrackerError> {
        if snapshot.state != SessionState::Finished {
            return Err(TrackerError::NotFinished(snapshot.state));
        }
        let started_at = snapshot.started_at.ok_or(TrackerError::MissingStartTime)?;
        let ended_at = snapshot.ended_at.unwrap_or(started_at);

        let route_polyline =
            polyline::encode_coordinates(snapshot.to_line_string(), POLYLINE_PRECISION)
                .map_err(|e| TrackerError::Polyline(e.to_string()))?;

        Ok(Self {
            user_id: user_id.into(),
            distance: snapshot.distance_m,
            duration: snapshot.duration_s,
            avg_pace: snapshot.pace_s_per_km,
            max_speed: snapshot.max_speed_kmh,
            calories: snapshot.calories_kcal,
            cadence: snapshot.cadence_spm,
            start_time: format_utc_rfc3339(started_at),
            end_time: format_utc_rfc3339(ended_at),
            route: snapshot.route.clone(),
            route_polyline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use chrono::{TimeZone, Utc};

    fn finished_snapshot() -> RunSessionSnapshot {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 1, 7, 10, 0).unwrap();
        RunSessionSnapshot {
            state: SessionState::Finished,
            distance_m: 1500.0,
            duration_s: 600,
            pace_s_per_km: 400.0,
            avg_speed_kmh: 9.0,
            max_speed_kmh: 12.5,
            cadence_spm: 203,
            calories_kcal: 134,
            started_at: Some(start),
            ended_at: Some(end),
            route: vec![
                RecordedPoint {
                    point: GeoPoint::new(38.5, -120.2),
                    timestamp: start,
                },
                RecordedPoint {
                    point: GeoPoint::new(40.7, -120.95),
                    timestamp: start,
                },
                RecordedPoint {
                    point: GeoPoint::new(43.252, -126.453),
                    timestamp: end,
                },
            ],
        }
    }

    #[test]
    fn test_record_from_finished_snapshot() {
        let record = RunRecord::from_snapshot(&finished_snapshot(), "user-1").unwrap();

        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.distance, 1500.0);
        assert_eq!(record.duration, 600);
        assert_eq!(record.avg_pace, 400.0);
        assert_eq!(record.start_time, "2024-05-01T07:00:00Z");
        assert_eq!(record.end_time, "2024-05-01T07:10:00Z");
        assert_eq!(record.route.len(), 3);
        // Reference polyline from the encoding algorithm's documentation
        assert_eq!(record.route_polyline, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    }

    #[test]
    fn test_record_json_is_camel_case() {
        let record = RunRecord::from_snapshot(&finished_snapshot(), "user-1").unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("userId").is_some());
        assert!(json.get("avgPace").is_some());
        assert!(json.get("maxSpeed").is_some());
        assert!(json.get("routePolyline").is_some());
        assert_eq!(json["route"][0]["lat"], 38.5);
    }

    #[test]
    fn test_record_requires_finished_session() {
        let mut snapshot = finished_snapshot();
        snapshot.state = SessionState::Paused;

        let err = RunRecord::from_snapshot(&snapshot, "user-1").unwrap_err();
        assert!(matches!(err, TrackerError::NotFinished(SessionState::Paused)));
    }

    #[test]
    fn test_record_requires_start_time() {
        let mut snapshot = finished_snapshot();
        snapshot.started_at = None;

        let err = RunRecord::from_snapshot(&snapshot, "user-1").unwrap_err();
        assert!(matches!(err, TrackerError::MissingStartTime));
    }
}
