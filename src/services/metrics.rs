// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived run metrics: pace, calories, cadence, max speed.
//!
//! Calories use a MET table keyed on average speed. Cadence is estimated
//! from distance with a fixed stride model rather than measured.

use crate::models::RunSession;
use crate::services::geo_math;

/// MET value for running at an average speed (km/h).
pub fn met_for_speed(v_kmh: f64) -> f64 {
    match v_kmh {
        v if v < 6.0 => 8.0,
        v if v < 8.0 => 9.5,
        v if v < 10.0 => 11.5,
        _ => 14.5,
    }
}

/// Recomputes derived fields of a session from its distance and duration.
#[derive(Debug, Clone, Copy)]
pub struct DerivedMetrics {
    body_weight_kg: f64,
    steps_per_km: f64,
}

impl DerivedMetrics {
    pub fn new(body_weight_kg: f64, steps_per_km: f64) -> Self {
        Self {
            body_weight_kg,
            steps_per_km,
        }
    }

    pub fn calories_kcal(&self, distance_m: f64, duration_s: u64) -> u32 {
        let met = met_for_speed(geo_math::avg_speed_kmh(distance_m, duration_s));
        (self.body_weight_kg * met * duration_s as f64 / 3600.0).round() as u32
    }

    pub fn cadence_spm(&self, distance_m: f64, duration_s: u64) -> u32 {
        if duration_s == 0 {
            return 0;
        }
        let estimated_steps = (distance_m / 1000.0 * self.steps_per_km).round();
        (estimated_steps / (duration_s as f64 / 60.0)).round() as u32
    }

    /// Refresh pace, calories and cadence in place.
    pub fn recompute(&self, session: &mut RunSession) {
        let (distance_m, duration_s) = (session.distance_m, session.duration_s);
        session.pace_s_per_km = geo_math::pace_s_per_km(duration_s, distance_m);
        session.calories_kcal = self.calories_kcal(distance_m, duration_s);
        session.cadence_spm = self.cadence_spm(distance_m, duration_s);
    }

    /// Raise the session's max speed if `speed_mps` beats it.
    pub fn observe_speed(&self, session: &mut RunSession, speed_mps: f64) {
        let kmh = geo_math::mps_to_kmh(speed_mps);
        if kmh > session.max_speed_kmh {
            session.max_speed_kmh = kmh;
        }
    }
}
