// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run tracking engine.
//!
//! Merges the 1 Hz duration timer and the location fix stream into one
//! consistent `RunSession`:
//!
//! 1. Fix → `SampleValidator` → `IntervalRecorder` → `DistanceAccumulator`
//! 2. Tick → duration, flush of the recorder's pending fix, derived metrics
//!
//! Every entry point takes `&mut self`, so each event is applied as a single
//! step; callers that share a tracker across tasks wrap it in one mutex
//! (see `RunSessionService`).

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::models::{
    Diagnostics, LocationFix, RecordedPoint, RunSession, RunSessionSnapshot, SessionState,
};
use crate::services::clock::{Clock, SystemClock};
use crate::services::distance::{AccumulateOutcome, DistanceAccumulator};
use crate::services::metrics::DerivedMetrics;
use crate::services::recorder::IntervalRecorder;
use crate::services::state_machine::{LifecycleCommand, SessionStateMachine, Transition};
use crate::services::validator::{RejectReason, SampleValidator};

/// Single-owner run tracking engine.
pub struct RunTracker {
    clock: Arc<dyn Clock>,
    session: RunSession,
    machine: SessionStateMachine,
    validator: SampleValidator,
    recorder: IntervalRecorder,
    accumulator: DistanceAccumulator,
    metrics: DerivedMetrics,
    diagnostics: Diagnostics,
    /// Next recorded point starts a new segment and adds no distance
    reanchor: bool,
}

impl RunTracker {
    /// Create an idle tracker on the system clock.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &EngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            session: RunSession::default(),
            machine: SessionStateMachine,
            validator: SampleValidator::new(config.max_accuracy_m),
            recorder: IntervalRecorder::new(config.recording_interval()),
            accumulator: DistanceAccumulator::new(config.max_jump_m, config.recording_interval()),
            metrics: DerivedMetrics::new(config.body_weight_kg, config.steps_per_km),
            diagnostics: Diagnostics::default(),
            reanchor: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn snapshot(&self) -> RunSessionSnapshot {
        self.session.snapshot()
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn start(&mut self) {
        self.apply(LifecycleCommand::Start);
    }

    pub fn pause(&mut self) {
        self.apply(LifecycleCommand::Pause);
    }

    pub fn resume(&mut self) {
        self.apply(LifecycleCommand::Resume);
    }

    /// Finish the run and return its final snapshot.
    ///
    /// Outside `Running`/`Paused` this is a no-op returning the current snapshot.
    pub fn stop(&mut self) -> RunSessionSnapshot {
        self.apply(LifecycleCommand::Stop);
        self.snapshot()
    }

    pub fn reset(&mut self) {
        self.apply(LifecycleCommand::Reset);
    }

    /// Apply a lifecycle command, returning the transition if one happened.
    pub fn apply(&mut self, command: LifecycleCommand) -> Option<Transition> {
        let from = self.session.state;
        let Some(transition) = self.machine.transition(from, command) else {
            tracing::debug!(state = %from, command = %command, "Ignoring lifecycle command");
            return None;
        };
        let now = self.clock.now();

        if transition.clears_session() {
            self.recorder.reset();
            self.diagnostics = Diagnostics::default();
            self.reanchor = false;
        }

        match command {
            LifecycleCommand::Start => self.session.begin(now),
            LifecycleCommand::Pause => {
                // Keep the stretch run since the last recorded point
                if let Some(point) = self.recorder.take_pending() {
                    self.record(point);
                }
                self.reanchor = true;
            }
            LifecycleCommand::Resume => {}
            LifecycleCommand::Stop => {
                if let Some(point) = self.recorder.take_pending() {
                    self.record(point);
                }
                self.recorder.reset();
                self.session.ended_at = Some(now);
                self.metrics.recompute(&mut self.session);
            }
            LifecycleCommand::Reset => self.session = RunSession::default(),
        }
        self.session.state = transition.to;

        tracing::info!(
            command = %command,
            from = %transition.from,
            to = %transition.to,
            distance_m = self.session.distance_m,
            duration_s = self.session.duration_s,
            "Session transition"
        );

        Some(transition)
    }

    /// Feed one fix from the location provider.
    ///
    /// Ignored unless running. Bad fixes are counted and dropped.
    pub fn ingest_fix(&mut self, fix: LocationFix) {
        self.diagnostics.fixes_received += 1;

        if self.session.state != SessionState::Running {
            self.diagnostics.ignored_inactive += 1;
            return;
        }

        if let Err(reason) = self.validator.validate(&fix) {
            match reason {
                RejectReason::LowAccuracy => self.diagnostics.rejected_low_accuracy += 1,
                RejectReason::InvalidCoordinate => {
                    self.diagnostics.rejected_invalid_coordinate += 1
                }
            }
            tracing::debug!(
                reason = %reason,
                accuracy_m = fix.accuracy_m,
                "Dropping location fix"
            );
            return;
        }

        self.metrics.observe_speed(&mut self.session, fix.speed_mps());

        let now = self.clock.now();
        if let Some(point) = self.recorder.offer(fix, now) {
            self.record(point);
        }
    }

    /// Advance the run by one second.
    ///
    /// Ignored unless running.
    pub fn tick(&mut self) {
        if self.session.state != SessionState::Running {
            return;
        }

        self.session.duration_s += 1;
        self.diagnostics.ticks_applied += 1;

        if let Some(point) = self.recorder.poll(self.clock.now()) {
            self.record(point);
        }
        self.metrics.recompute(&mut self.session);
    }

    fn record(&mut self, point: RecordedPoint) {
        let prev = if self.reanchor {
            None
        } else {
            self.session.last_point()
        };
        let outcome = self.accumulator.accumulate(prev, &point);
        self.reanchor = false;

        self.session.distance_m += outcome.applied_m();
        if let AccumulateOutcome::RejectedOutlier(delta_m) = outcome {
            self.diagnostics.outliers_rejected += 1;
            tracing::debug!(
                delta_m,
                lat = point.point.lat,
                lng = point.point.lng,
                "Rejected GPS jump"
            );
        }

        self.session.route.push(point);
        self.diagnostics.points_recorded += 1;

        if let AccumulateOutcome::Applied(_) = outcome {
            self.metrics.recompute(&mut self.session);
        }
    }
}
