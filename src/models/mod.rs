// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for run tracking.

pub mod location;
pub mod record;
pub mod session;

pub use location::{GeoPoint, LocationFix, RecordedPoint};
pub use record::RunRecord;
pub use session::{Diagnostics, RunSession, RunSessionSnapshot, SessionState};
