//! Periodic tick driver
//!
//! Drives the state machine's `tick()` at a fixed cadence on a plain tokio
//! interval; the cron scheduler is reserved for the calendar-aligned
//! maintenance jobs.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::error::{SchedulerError, SchedulerResult};
use super::jobs::ScheduledJob;

const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Fixed-cadence driver with explicit lifecycle management.
pub struct TickDriver {
    job: Arc<dyn ScheduledJob>,
    interval: Duration,
    cancellation: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl TickDriver {
    /// Create a driver invoking `job` every `interval`.
    pub fn new(job: Arc<dyn ScheduledJob>, interval: Duration) -> Self {
        Self { job, interval, cancellation: CancellationToken::new(), handle: None }
    }

    /// Start the tick loop.
    pub fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();
        let cancel = self.cancellation.clone();
        let job = Arc::clone(&self.job);
        let period = self.interval;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        if let Err(err) = job.run().await {
                            warn!(error = %err, "tick failed");
                        }
                    }
                }
            }
        });

        self.handle = Some(handle);
        info!(interval_secs = self.interval.as_secs(), "tick driver started");
        Ok(())
    }

    /// Stop the loop and wait for the task to finish.
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();
        if let Some(handle) = self.handle.take() {
            tokio::time::timeout(JOIN_TIMEOUT, handle)
                .await
                .map_err(|_| SchedulerError::Timeout { seconds: JOIN_TIMEOUT.as_secs() })?
                .map_err(|err| SchedulerError::TaskJoinFailed(err.to_string()))?;
        }
        info!("tick driver stopped");
        Ok(())
    }

    /// Returns true while the tick task is active.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}
