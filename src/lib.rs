// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Run-Tracker: live run session tracking from a noisy GPS stream
//!
//! This crate turns irregular location fixes and a 1 Hz timer into one
//! consistent run record (distance, duration, pace, speed, calories,
//! cadence) behind a small idle/running/paused/finished lifecycle.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use config::EngineConfig;
pub use error::{ProviderError, TrackerError};
pub use models::{GeoPoint, LocationFix, RecordedPoint, RunRecord, RunSessionSnapshot, SessionState};
pub use services::{RunSessionService, RunTracker};
