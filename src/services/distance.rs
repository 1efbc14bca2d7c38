// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Incremental distance between consecutive route points, with GPS jump
//! suppression.

use std::time::Duration;

use crate::models::RecordedPoint;
use crate::services::geo_math::haversine_m;

/// Result of measuring the step to a new route point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccumulateOutcome {
    /// First point of a segment; it only anchors the route.
    Anchored,
    /// Plausible step, to be added to the run distance.
    Applied(f64),
    /// Implausible jump; the point stays on the route but the step is not counted.
    RejectedOutlier(f64),
}

impl AccumulateOutcome {
    /// Meters to add to the run distance.
    pub fn applied_m(&self) -> f64 {
        match self {
            AccumulateOutcome::Applied(delta) => *delta,
            AccumulateOutcome::Anchored | AccumulateOutcome::RejectedOutlier(_) => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DistanceAccumulator {
    max_jump_m: f64,
    interval_ms: u64,
}

impl DistanceAccumulator {
    pub fn new(max_jump_m: f64, recording_interval: Duration) -> Self {
        Self {
            max_jump_m,
            interval_ms: (recording_interval.as_millis() as u64).max(1),
        }
    }

    /// Classify the step from `prev` to `next`.
    ///
    /// A step is an outlier when it covers `max_jump_m` or more per recording
    /// interval elapsed between the two points (at least one interval).
    pub fn accumulate(&self, prev: Option<&RecordedPoint>, next: &RecordedPoint) -> AccumulateOutcome {
        let Some(prev) = prev else {
            return AccumulateOutcome::Anchored;
        };

        let delta = haversine_m(prev.point, next.point);
        if delta >= self.jump_budget_m(prev, next) {
            AccumulateOutcome::RejectedOutlier(delta)
        } else {
            AccumulateOutcome::Applied(delta)
        }
    }

    fn jump_budget_m(&self, prev: &RecordedPoint, next: &RecordedPoint) -> f64 {
        let elapsed_ms = (next.timestamp - prev.timestamp).num_milliseconds().max(0) as u64;
        let intervals = (elapsed_ms / self.interval_ms).max(1);
        self.max_jump_m * intervals as f64
    }
}
