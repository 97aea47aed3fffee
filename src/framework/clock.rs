//! # Simulation Clock
//!
//! Drives [`ActorEntity::on_tick`](crate::framework::ActorEntity::on_tick) on a fixed wall-clock
//! period. The clock owns one timer task per tracked entity; each task sends `Tick` requests
//! through a cloned [`ResourceClient`], so ticks are serialized with every other request the
//! actor handles.
//!
//! A timer ends on its own when the entity reports a final tick or disappears. Otherwise it
//! lives until [`SimulationClock::untrack`], [`SimulationClock::stop_all`], or until the clock
//! is dropped. No timer outlives the clock that owns it.

use crate::framework::client::ResourceClient;
use crate::framework::entity::{ActorEntity, TickReport};
use crate::framework::error::FrameworkError;
use std::collections::HashMap;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

pub struct SimulationClock<T: ActorEntity> {
    client: ResourceClient<T>,
    period: Duration,
    timers: HashMap<T::Id, JoinHandle<()>>,
}

impl<T: ActorEntity> SimulationClock<T> {
    /// Fails with [`FrameworkError::InvalidPeriod`] for a zero period.
    pub fn new(client: ResourceClient<T>, period: Duration) -> Result<Self, FrameworkError> {
        if period.is_zero() {
            return Err(FrameworkError::InvalidPeriod(period));
        }
        Ok(Self {
            client,
            period,
            timers: HashMap::new(),
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts a timer for `id`. Returns `false` if one is already running for it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn track(&mut self, id: T::Id) -> bool {
        self.prune();
        if self.timers.contains_key(&id) {
            debug!(%id, "Already tracked");
            return false;
        }

        let client = self.client.clone();
        let period = self.period;
        let timer_id = id.clone();
        let handle = tokio::spawn(async move { run_timer(client, timer_id, period).await });

        info!(%id, period_ms = period.as_millis() as u64, "Tracking started");
        self.timers.insert(id, handle);
        true
    }

    /// Stops the timer for `id`. Returns `true` if a running timer was stopped.
    pub fn untrack(&mut self, id: &T::Id) -> bool {
        match self.timers.remove(id) {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                if was_running {
                    info!(%id, "Tracking stopped");
                }
                was_running
            }
            None => false,
        }
    }

    /// Whether a timer is still running for `id`.
    pub fn is_tracking(&self, id: &T::Id) -> bool {
        self.timers
            .get(id)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of timers still running.
    pub fn active(&self) -> usize {
        self.timers.values().filter(|h| !h.is_finished()).count()
    }

    /// Aborts every timer.
    pub fn stop_all(&mut self) {
        let stopped = self.timers.len();
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
        if stopped > 0 {
            info!(stopped, "All timers stopped");
        }
    }

    fn prune(&mut self) {
        self.timers.retain(|_, handle| !handle.is_finished());
    }
}

impl<T: ActorEntity> Drop for SimulationClock<T> {
    fn drop(&mut self) {
        self.stop_all();
    }
}

async fn run_timer<T: ActorEntity>(client: ResourceClient<T>, id: T::Id, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of an interval completes immediately.
    interval.tick().await;

    loop {
        interval.tick().await;
        match client.tick(id.clone()).await {
            Ok(report) if report.is_final() => {
                debug!(%id, ?report, "Timer finished");
                break;
            }
            Ok(_) => {}
            Err(FrameworkError::NotFound(_)) => {
                debug!(%id, "Entity gone, timer finished");
                break;
            }
            Err(e) => {
                warn!(%id, error = %e, "Timer stopped");
                break;
            }
        }
    }
}
