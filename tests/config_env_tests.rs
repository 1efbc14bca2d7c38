// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Building a session service from the environment.
//!
//! Kept to a single test so nothing else in this binary sees the
//! modified environment.

use run_tracker::services::{ChannelLocationProvider, RunSessionService};
use run_tracker::TrackerError;
use std::env;
use std::sync::Arc;

#[tokio::test]
async fn test_service_from_env() {
    let provider = Arc::new(ChannelLocationProvider::new(4));

    env::set_var("RUN_TICK_PERIOD_MS", "soon");
    let result = RunSessionService::from_env(provider.clone());
    match result {
        Err(TrackerError::Config(e)) => assert!(e.to_string().contains("RUN_TICK_PERIOD_MS")),
        Err(e) => panic!("expected config error, got {}", e),
        Ok(_) => panic!("invalid tick period should be rejected"),
    }

    env::set_var("RUN_TICK_PERIOD_MS", "500");
    let service = RunSessionService::from_env(provider).expect("valid config");
    assert!(!service.is_active());
    env::remove_var("RUN_TICK_PERIOD_MS");
}
