//! Periodic sync scheduling.
//!
//! A recurring trigger drives `pull()` on a fixed interval. The returned
//! handle owns the task's lifecycle: `stop()` aborts it, abandoning any
//! pending network call best-effort.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::engine::SyncEngine;
use crate::remote::RemoteSource;

/// Handle to a running periodic pull task.
#[derive(Debug)]
pub struct SchedulerHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop the schedule. An in-flight pull is abandoned.
    pub fn stop(self) {
        self.handle.abort();
    }

    /// Whether the task is still running.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

/// Spawn a task that pulls on a fixed interval.
///
/// The first pull fires one full interval after the call; there is no
/// immediate kick. Overlap with a manual trigger is handled by the engine's
/// in-flight gate, so a tick landing mid-sync is simply dropped.
pub fn spawn_periodic_pull<R>(engine: Arc<SyncEngine<R>>, period: Duration) -> SchedulerHandle
where
    R: RemoteSource + 'static,
{
    let handle = tokio::spawn(async move {
        tracing::info!("periodic sync started (interval: {:?})", period);

        let mut timer = tokio::time::interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval() fires its first tick immediately; consume it.
        timer.tick().await;

        loop {
            timer.tick().await;
            engine.pull().await;
        }
    });
    SchedulerHandle { handle }
}
