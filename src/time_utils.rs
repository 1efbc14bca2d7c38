// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time and run display formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format an elapsed duration as `MM:SS`, or `H:MM:SS` from one hour up.
pub fn format_duration(duration_s: u64) -> String {
    let hours = duration_s / 3600;
    let minutes = (duration_s % 3600) / 60;
    let seconds = duration_s % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Format a pace in seconds per kilometer as `M:SS`.
///
/// A zero or non-finite pace (no distance yet) renders as `--:--`.
pub fn format_pace(pace_s_per_km: f64) -> String {
    if !pace_s_per_km.is_finite() || pace_s_per_km <= 0.0 {
        return "--:--".to_string();
    }
    let total = pace_s_per_km.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
