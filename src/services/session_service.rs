// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Async driver for a run session.
//!
//! Owns the two producers that feed the tracker while a run is in progress:
//! a periodic duration timer and the location provider subscription. Both
//! write to the same `RunTracker` behind a single mutex, so a tick and a fix
//! are never interleaved mid-update.
//!
//! Lifecycle commands switch the producers on and off:
//! - entering `Running` spawns the timer and subscribes to locations
//! - leaving `Running` unsubscribes and cancels the timer *before* the state
//!   change, so a stopped session cannot be touched by a late event

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::EngineConfig;
use crate::error::{ProviderError, Result, TrackerError};
use crate::models::{Diagnostics, LocationFix, RunSessionSnapshot, SessionState};
use crate::services::clock::{Clock, SystemClock};
use crate::services::state_machine::{
    LifecycleCommand, ProducerEffect, SessionStateMachine, Transition,
};
use crate::services::tracker::RunTracker;

/// Tracker shared between the lifecycle API and the producer tasks.
pub type SharedTracker = Arc<Mutex<RunTracker>>;

/// Source of location fixes (platform GPS, replay, test harness).
pub trait LocationProvider: Send + Sync + 'static {
    /// Start delivering fixes on a new channel.
    fn subscribe(&self) -> std::result::Result<mpsc::Receiver<LocationFix>, ProviderError>;

    /// Stop delivering fixes. Must be safe to call when not subscribed.
    fn unsubscribe(&self);
}

/// In-process provider: fixes published while nobody is subscribed, or while
/// the channel is full, are dropped rather than queued.
#[derive(Debug)]
pub struct ChannelLocationProvider {
    capacity: usize,
    sender: Mutex<Option<mpsc::Sender<LocationFix>>>,
}

impl ChannelLocationProvider {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            sender: Mutex::new(None),
        }
    }

    /// Deliver a fix to the current subscriber. Returns false if it was dropped.
    pub fn publish(&self, fix: LocationFix) -> bool {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        match sender.as_ref() {
            Some(tx) => tx.try_send(fix).is_ok(),
            None => false,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl LocationProvider for ChannelLocationProvider {
    fn subscribe(&self) -> std::result::Result<mpsc::Receiver<LocationFix>, ProviderError> {
        let (tx, rx) = mpsc::channel(self.capacity);
        *self.sender.lock().unwrap_or_else(PoisonError::into_inner) = Some(tx);
        Ok(rx)
    }

    fn unsubscribe(&self) {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

/// Handles of the running producer tasks.
///
/// `abort()` cannot stop a task that is already waiting on the tracker lock,
/// so each activation also gets a `live` flag that the tasks check while
/// holding the lock.
struct Producers {
    live: Arc<AtomicBool>,
    timer: JoinHandle<()>,
    location: Option<JoinHandle<()>>,
}

/// Drives one `RunTracker` from a timer and a location provider.
pub struct RunSessionService {
    tracker: SharedTracker,
    provider: Arc<dyn LocationProvider>,
    tick_period: Duration,
    runtime: Handle,
    /// Also serializes lifecycle commands
    producers: Mutex<Option<Producers>>,
}

impl RunSessionService {
    /// Build a service on the current Tokio runtime, using the system clock.
    pub fn new(config: &EngineConfig, provider: Arc<dyn LocationProvider>) -> Result<Self> {
        Self::with_clock(config, provider, Arc::new(SystemClock))
    }

    /// Build a service from `RUN_*` environment variables.
    pub fn from_env(provider: Arc<dyn LocationProvider>) -> Result<Self> {
        let config = EngineConfig::from_env()?;
        Self::new(&config, provider)
    }

    pub fn with_clock(
        config: &EngineConfig,
        provider: Arc<dyn LocationProvider>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| TrackerError::NoRuntime)?;

        Ok(Self {
            tracker: Arc::new(Mutex::new(RunTracker::with_clock(config, clock))),
            provider,
            tick_period: config.tick_period().max(Duration::from_millis(1)),
            runtime,
            producers: Mutex::new(None),
        })
    }

    pub fn start(&self) {
        self.command(LifecycleCommand::Start);
    }

    pub fn pause(&self) {
        self.command(LifecycleCommand::Pause);
    }

    pub fn resume(&self) {
        self.command(LifecycleCommand::Resume);
    }

    /// Finish the run. Producers are gone and the session frozen on return.
    pub fn stop(&self) -> RunSessionSnapshot {
        self.command(LifecycleCommand::Stop);
        self.snapshot()
    }

    pub fn reset(&self) {
        self.command(LifecycleCommand::Reset);
    }

    pub fn snapshot(&self) -> RunSessionSnapshot {
        lock_tracker(&self.tracker).snapshot()
    }

    pub fn state(&self) -> SessionState {
        lock_tracker(&self.tracker).state()
    }

    pub fn diagnostics(&self) -> Diagnostics {
        lock_tracker(&self.tracker).diagnostics()
    }

    /// Whether the timer and location subscription are live.
    pub fn is_active(&self) -> bool {
        self.lock_producers().is_some()
    }

    /// Apply a lifecycle command and switch the producers to match.
    pub fn command(&self, command: LifecycleCommand) -> Option<Transition> {
        let mut producers = self.lock_producers();

        let current = lock_tracker(&self.tracker).state();
        let Some(planned) = SessionStateMachine.transition(current, command) else {
            // Let the tracker log the ignored command
            return lock_tracker(&self.tracker).apply(command);
        };

        if planned.producers() == ProducerEffect::Deactivate {
            self.deactivate(&mut producers);
        }
        let applied = lock_tracker(&self.tracker).apply(command);
        if planned.producers() == ProducerEffect::Activate {
            self.activate(&mut producers);
        }

        applied
    }

    fn activate(&self, slot: &mut Option<Producers>) {
        if slot.is_some() {
            return;
        }

        let live = Arc::new(AtomicBool::new(true));
        let timer = self.runtime.spawn(run_timer(
            Arc::clone(&self.tracker),
            Arc::clone(&live),
            self.tick_period,
        ));

        let location = match self.provider.subscribe() {
            Ok(rx) => Some(self.runtime.spawn(forward_fixes(
                Arc::clone(&self.tracker),
                Arc::clone(&live),
                rx,
            ))),
            Err(e) => {
                tracing::warn!(error = %e, "Location unavailable, tracking duration only");
                None
            }
        };

        tracing::debug!(
            tick_period_ms = self.tick_period.as_millis() as u64,
            location = location.is_some(),
            "Producers activated"
        );
        *slot = Some(Producers {
            live,
            timer,
            location,
        });
    }

    fn deactivate(&self, slot: &mut Option<Producers>) {
        let Some(producers) = slot.take() else {
            return;
        };

        producers.live.store(false, Ordering::SeqCst);
        self.provider.unsubscribe();
        if let Some(location) = producers.location {
            location.abort();
        }
        producers.timer.abort();

        tracing::debug!("Producers deactivated");
    }

    fn lock_producers(&self) -> MutexGuard<'_, Option<Producers>> {
        self.producers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for RunSessionService {
    fn drop(&mut self) {
        let mut producers = self.lock_producers();
        self.deactivate(&mut producers);
    }
}

fn lock_tracker(tracker: &Mutex<RunTracker>) -> MutexGuard<'_, RunTracker> {
    tracker.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_timer(tracker: SharedTracker, live: Arc<AtomicBool>, period: Duration) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    // Missed ticks are replayed so duration keeps up with wall time
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        interval.tick().await;
        let mut guard = lock_tracker(&tracker);
        if !live.load(Ordering::SeqCst) {
            tracing::debug!("Dropping tick from deactivated timer");
            return;
        }
        guard.tick();
    }
}

async fn forward_fixes(
    tracker: SharedTracker,
    live: Arc<AtomicBool>,
    mut rx: mpsc::Receiver<LocationFix>,
) {
    while let Some(fix) = rx.recv().await {
        let mut guard = lock_tracker(&tracker);
        if !live.load(Ordering::SeqCst) {
            tracing::debug!("Dropping fix from deactivated subscription");
            return;
        }
        guard.ingest_fix(fix);
    }
    tracing::debug!("Location stream closed");
}
