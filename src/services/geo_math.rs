// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle distance and speed/pace conversions.
//!
//! Pure, allocation-free functions.

use crate::models::GeoPoint;

/// Mean Earth radius used for great-circle distances (meters).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points, in meters.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1 for antipodal points
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Pace in whole seconds per kilometer; 0 until some distance is covered.
pub fn pace_s_per_km(duration_s: u64, distance_m: f64) -> f64 {
    if !(distance_m > 0.0) {
        return 0.0;
    }
    (duration_s as f64 / distance_m * 1000.0).round()
}

/// Convert m/s to km/h; non-positive (or NaN) speeds map to 0.
pub fn mps_to_kmh(v: f64) -> f64 {
    if !(v > 0.0) {
        return 0.0;
    }
    v * 3.6
}

/// Average speed over the whole run in km/h; 0 before the first second.
pub fn avg_speed_kmh(distance_m: f64, duration_s: u64) -> f64 {
    if duration_s == 0 || !(distance_m > 0.0) {
        return 0.0;
    }
    (distance_m / 1000.0) / (duration_s as f64 / 3600.0)
}
