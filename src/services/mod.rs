// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the run tracking engine and its driver.

pub mod clock;
pub mod distance;
pub mod geo_math;
pub mod metrics;
pub mod recorder;
pub mod replay;
pub mod session_service;
pub mod state_machine;
pub mod tracker;
pub mod validator;

pub use clock::{Clock, ManualClock, SystemClock};
pub use distance::{AccumulateOutcome, DistanceAccumulator};
pub use metrics::DerivedMetrics;
pub use recorder::IntervalRecorder;
pub use replay::replay_fixes;
pub use session_service::{
    ChannelLocationProvider, LocationProvider, RunSessionService, SharedTracker,
};
pub use state_machine::{LifecycleCommand, ProducerEffect, SessionStateMachine, Transition};
pub use tracker::RunTracker;
pub use validator::{RejectReason, SampleValidator};
