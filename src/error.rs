// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the outer surfaces of the tracker.
//!
//! The engine itself has no failure modes: bad fixes are filtered and
//! out-of-state commands are no-ops. Errors only come from configuration,
//! driver setup, and record export. Location provider failures are reported
//! as `ProviderError` and degrade the session to duration-only tracking.

use crate::config::ConfigError;
use crate::models::SessionState;

/// Tracker error type.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("No Tokio runtime available to drive the session")]
    NoRuntime,

    #[error("Session is not finished (state: {0})")]
    NotFinished(SessionState),

    #[error("Session has no start time")]
    MissingStartTime,

    #[error("Failed to encode route polyline: {0}")]
    Polyline(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Failures reported by a location provider when subscribing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location provider unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
