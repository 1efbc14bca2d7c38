// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Property tests for the tracker's ordering guarantees.

use chrono::TimeDelta;
use proptest::prelude::*;
use run_tracker::models::{GeoPoint, LocationFix, SessionState};
use run_tracker::services::Clock;
use run_tracker::RunTracker;

mod common;
use common::{manual_tracker, ORIGIN};

/// One input event for the tracker.
#[derive(Debug, Clone)]
enum Event {
    Tick,
    Fix {
        after_ms: i64,
        d_lat: f64,
        d_lng: f64,
        accuracy_m: f64,
        speed_mps: f64,
    },
    Pause,
    Resume,
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        6 => Just(Event::Tick),
        6 => (0i64..1500, -0.002f64..0.002, -0.002f64..0.002, 1.0f64..40.0, -1.0f64..8.0)
            .prop_map(|(after_ms, d_lat, d_lng, accuracy_m, speed_mps)| Event::Fix {
                after_ms,
                d_lat,
                d_lng,
                accuracy_m,
                speed_mps,
            }),
        1 => Just(Event::Pause),
        1 => Just(Event::Resume),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_totals_never_decrease(events in prop::collection::vec(event(), 1..200)) {
        let (mut tracker, clock) = manual_tracker();
        tracker.start();
        let mut position = ORIGIN;
        let mut prev = tracker.snapshot();

        for event in events {
            match event {
                Event::Tick => {
                    clock.advance(TimeDelta::seconds(1));
                    tracker.tick();
                }
                Event::Fix { after_ms, d_lat, d_lng, accuracy_m, speed_mps } => {
                    clock.advance(TimeDelta::milliseconds(after_ms));
                    position = GeoPoint::new(position.lat + d_lat, position.lng + d_lng);
                    let fix = LocationFix::new(position, accuracy_m, clock.now())
                        .with_speed(speed_mps);
                    tracker.ingest_fix(fix);
                }
                Event::Pause => tracker.pause(),
                Event::Resume => tracker.resume(),
            }

            let snap = tracker.snapshot();
            prop_assert!(snap.distance_m >= prev.distance_m);
            prop_assert!(snap.duration_s >= prev.duration_s);
            prop_assert!(snap.max_speed_kmh >= prev.max_speed_kmh);
            prop_assert!(snap.route.len() >= prev.route.len());
            prop_assert_eq!(&snap.route[..prev.route.len()], &prev.route[..]);
            if snap.distance_m > 0.0 {
                prop_assert!(snap.route.len() >= 2);
            }
            if snap.state == SessionState::Paused {
                prop_assert_eq!(snap.duration_s, prev.duration_s);
            }
            prev = snap;
        }
    }

    #[test]
    fn prop_finished_session_is_frozen(
        before in prop::collection::vec(event(), 0..50),
        after in prop::collection::vec(event(), 1..50),
    ) {
        let (mut tracker, clock) = manual_tracker();
        tracker.start();
        let mut position = ORIGIN;

        let mut feed = |tracker: &mut RunTracker, events: Vec<Event>| {
            for event in events {
                match event {
                    Event::Tick => {
                        clock.advance(TimeDelta::seconds(1));
                        tracker.tick();
                    }
                    Event::Fix { after_ms, d_lat, d_lng, accuracy_m, speed_mps } => {
                        clock.advance(TimeDelta::milliseconds(after_ms));
                        position = GeoPoint::new(position.lat + d_lat, position.lng + d_lng);
                        let fix = LocationFix::new(position, accuracy_m, clock.now())
                            .with_speed(speed_mps);
                        tracker.ingest_fix(fix);
                    }
                    Event::Pause => tracker.pause(),
                    Event::Resume => tracker.resume(),
                }
            }
        };

        feed(&mut tracker, before);
        let stopped = tracker.stop();
        feed(&mut tracker, after);

        prop_assert_eq!(tracker.snapshot(), stopped);
    }
}
