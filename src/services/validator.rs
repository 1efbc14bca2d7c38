// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quality gate for raw GPS fixes.

use crate::models::LocationFix;

/// Why a fix was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("accuracy radius above threshold")]
    LowAccuracy,

    #[error("coordinate out of range or not finite")]
    InvalidCoordinate,
}

/// Rejects fixes that fail basic quality checks. Stateless.
#[derive(Debug, Clone, Copy)]
pub struct SampleValidator {
    max_accuracy_m: f64,
}

impl SampleValidator {
    pub fn new(max_accuracy_m: f64) -> Self {
        Self { max_accuracy_m }
    }

    /// Check a fix. Accuracy is tested before coordinates.
    pub fn validate(&self, fix: &LocationFix) -> Result<(), RejectReason> {
        // NaN accuracy is as useless as a huge one
        if !(fix.accuracy_m <= self.max_accuracy_m) {
            return Err(RejectReason::LowAccuracy);
        }
        if !fix.point.is_valid() {
            return Err(RejectReason::InvalidCoordinate);
        }
        Ok(())
    }
}
