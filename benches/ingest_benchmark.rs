use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use run_tracker::config::EngineConfig;
use run_tracker::models::{GeoPoint, LocationFix};
use run_tracker::services::{geo_math, replay_fixes, ManualClock, RunTracker};
use std::hint::black_box;
use std::sync::Arc;

/// Ten minutes of 1 Hz fixes heading north at ~3 m/s.
fn synthetic_trace() -> Vec<LocationFix> {
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 6, 30, 0).unwrap();
    (0..600)
        .map(|i| {
            let lat = 37.5665 + (i as f64 * 3.0) / 111_194.93;
            LocationFix::new(GeoPoint::new(lat, 126.9780), 8.0, t0 + TimeDelta::seconds(i))
                .with_speed(3.0)
        })
        .collect()
}

fn benchmark_haversine(c: &mut Criterion) {
    let a = GeoPoint::new(37.5665, 126.9780);
    let b = GeoPoint::new(37.5700, 126.9820);

    c.bench_function("haversine_m", |bench| {
        bench.iter(|| geo_math::haversine_m(black_box(a), black_box(b)))
    });
}

fn benchmark_tracker(c: &mut Criterion) {
    let config = EngineConfig::default();
    let trace = synthetic_trace();

    let mut group = c.benchmark_group("tracker");

    group.bench_function("ingest_and_tick_600s", |b| {
        b.iter(|| {
            let clock = Arc::new(ManualClock::new(trace[0].observed_at));
            let mut tracker = RunTracker::with_clock(&config, clock.clone());
            tracker.start();
            for fix in &trace {
                clock.set(fix.observed_at);
                tracker.ingest_fix(black_box(fix.clone()));
                tracker.tick();
            }
            black_box(tracker.stop())
        })
    });

    group.bench_function("replay_600s", |b| {
        b.iter(|| replay_fixes(&config, black_box(&trace)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_haversine, benchmark_tracker);
criterion_main!(benches);
