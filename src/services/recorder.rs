// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Throttles the validated fix stream to one route point per interval.
//!
//! The first fix ever offered is recorded immediately and fixes the phase.
//! After that, fixes arriving inside the interval are buffered, and only the
//! most recent one survives to be recorded once the interval has elapsed.

use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

use crate::models::{LocationFix, RecordedPoint};

#[derive(Debug, Clone)]
pub struct IntervalRecorder {
    interval: TimeDelta,
    last_emit_at: Option<DateTime<Utc>>,
    pending: Option<LocationFix>,
}

impl IntervalRecorder {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: TimeDelta::from_std(interval).unwrap_or(TimeDelta::MAX),
            last_emit_at: None,
            pending: None,
        }
    }

    /// Offer a validated fix observed by the caller at `now`.
    pub fn offer(&mut self, fix: LocationFix, now: DateTime<Utc>) -> Option<RecordedPoint> {
        if !self.interval_elapsed(now) {
            self.pending = Some(fix);
            return None;
        }
        let emitted = self.pending.take().unwrap_or(fix);
        self.last_emit_at = Some(now);
        Some(RecordedPoint::from(&emitted))
    }

    /// Record the buffered fix if its interval has elapsed.
    ///
    /// Lets the timer flush the last fix of an interval when the provider
    /// goes quiet.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<RecordedPoint> {
        if self.pending.is_none() || !self.interval_elapsed(now) {
            return None;
        }
        let emitted = self.pending.take()?;
        self.last_emit_at = Some(now);
        Some(RecordedPoint::from(&emitted))
    }

    /// Hand over the buffered fix without waiting for the interval.
    ///
    /// The recording phase is left alone.
    pub fn take_pending(&mut self) -> Option<RecordedPoint> {
        self.pending.take().map(|fix| RecordedPoint::from(&fix))
    }

    /// Forget all state, including the phase.
    pub fn reset(&mut self) {
        self.last_emit_at = None;
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_emit_at(&self) -> Option<DateTime<Utc>> {
        self.last_emit_at
    }

    fn interval_elapsed(&self, now: DateTime<Utc>) -> bool {
        match self.last_emit_at {
            None => true,
            Some(last) => now - last >= self.interval,
        }
    }
}
