// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPS position types: raw fixes from the location provider and the
//! recorded points that make up a run's route.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True if both coordinates are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<GeoPoint> for geo::Coord<f64> {
    /// geo uses x = longitude, y = latitude.
    fn from(p: GeoPoint) -> Self {
        geo::Coord { x: p.lng, y: p.lat }
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        geo::Point::new(p.lng, p.lat)
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(p: geo::Point<f64>) -> Self {
        GeoPoint::new(p.y(), p.x())
    }
}

/// One raw reading from the location provider. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFix {
    #[serde(flatten)]
    pub point: GeoPoint,
    /// Horizontal accuracy radius (meters)
    pub accuracy_m: f64,
    /// Ground speed reported by the provider (m/s), absent on some devices
    #[serde(default)]
    pub speed_mps: Option<f64>,
    /// Course over ground (degrees from true north)
    #[serde(default)]
    pub heading_deg: Option<f64>,
    pub observed_at: DateTime<Utc>,
}

impl LocationFix {
    pub fn new(point: GeoPoint, accuracy_m: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            point,
            accuracy_m,
            speed_mps: None,
            heading_deg: None,
            observed_at,
        }
    }

    pub fn with_speed(mut self, speed_mps: f64) -> Self {
        self.speed_mps = Some(speed_mps);
        self
    }

    pub fn with_heading(mut self, heading_deg: f64) -> Self {
        self.heading_deg = Some(heading_deg);
        self
    }

    /// Reported speed, with a missing or negative value treated as 0.
    pub fn speed_mps(&self) -> f64 {
        self.speed_mps.filter(|v| *v > 0.0).unwrap_or(0.0)
    }
}

/// A fix that survived validation and interval throttling.
///
/// Appended to the route, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecordedPoint {
    #[serde(flatten)]
    pub point: GeoPoint,
    pub timestamp: DateTime<Utc>,
}

impl From<&LocationFix> for RecordedPoint {
    fn from(fix: &LocationFix) -> Self {
        Self {
            point: fix.point,
            timestamp: fix.observed_at,
        }
    }
}
