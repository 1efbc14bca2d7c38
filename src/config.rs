// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Engine configuration loaded from environment variables.
//!
//! Every threshold has a default matching the product's current behavior.
//! The outlier and accuracy thresholds are still awaiting product
//! validation, so they are tunable rather than hard-coded.

use std::env;
use std::time::Duration;

/// Default maximum accepted GPS accuracy radius (meters).
pub const DEFAULT_MAX_ACCURACY_M: f64 = 25.0;
/// Default recording cadence for route points (milliseconds).
pub const DEFAULT_RECORDING_INTERVAL_MS: u64 = 2000;
/// Default largest plausible step per recording interval (meters).
pub const DEFAULT_MAX_JUMP_M: f64 = 100.0;
/// Default body weight for calorie estimates (kg).
pub const DEFAULT_BODY_WEIGHT_KG: f64 = 70.0;
/// Default stride model for cadence estimates.
pub const DEFAULT_STEPS_PER_KM: f64 = 1350.0;
/// Default duration timer period (milliseconds).
pub const DEFAULT_TICK_PERIOD_MS: u64 = 1000;

/// Tracker configuration, loaded once when a session service is built.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Fixes with a larger accuracy radius are dropped
    pub max_accuracy_m: f64,
    /// At most one route point is recorded per interval
    pub recording_interval_ms: u64,
    /// Steps at or above this distance per interval are treated as GPS jumps
    pub max_jump_m: f64,
    pub body_weight_kg: f64,
    pub steps_per_km: f64,
    /// Period of the duration timer driven by the session service
    pub tick_period_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_accuracy_m: DEFAULT_MAX_ACCURACY_M,
            recording_interval_ms: DEFAULT_RECORDING_INTERVAL_MS,
            max_jump_m: DEFAULT_MAX_JUMP_M,
            body_weight_kg: DEFAULT_BODY_WEIGHT_KG,
            steps_per_km: DEFAULT_STEPS_PER_KM,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is loaded first if present. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            max_accuracy_m: parse_positive_f64(
                &lookup,
                "RUN_MAX_ACCURACY_M",
                defaults.max_accuracy_m,
            )?,
            recording_interval_ms: parse_positive_u64(
                &lookup,
                "RUN_RECORDING_INTERVAL_MS",
                defaults.recording_interval_ms,
            )?,
            max_jump_m: parse_positive_f64(&lookup, "RUN_MAX_JUMP_M", defaults.max_jump_m)?,
            body_weight_kg: parse_positive_f64(
                &lookup,
                "RUN_BODY_WEIGHT_KG",
                defaults.body_weight_kg,
            )?,
            steps_per_km: parse_positive_f64(&lookup, "RUN_STEPS_PER_KM", defaults.steps_per_km)?,
            tick_period_ms: parse_positive_u64(
                &lookup,
                "RUN_TICK_PERIOD_MS",
                defaults.tick_period_ms,
            )?,
        })
    }

    pub fn recording_interval(&self) -> Duration {
        Duration::from_millis(self.recording_interval_ms)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

fn parse_positive_f64<F>(lookup: &F, var: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(ConfigError::Invalid { var, value: raw }),
    }
}

fn parse_positive_u64<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::Invalid { var, value: raw }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
