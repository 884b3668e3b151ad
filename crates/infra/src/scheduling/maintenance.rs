//! Calendar-aligned maintenance scheduler
//!
//! Runs the daily-reset job at local midnight and the retention cleanup
//! hourly, on a cron scheduler with explicit start/stop and per-job
//! timeouts.

use std::sync::Arc;
use std::time::Duration;

use tabguard_domain::constants::{CLEANUP_CRON, DAILY_RESET_CRON};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::error::{SchedulerError, SchedulerResult};
use super::jobs::ScheduledJob;

/// Configuration for the maintenance scheduler.
#[derive(Debug, Clone)]
pub struct MaintenanceSchedulerConfig {
    /// Cron expression for the daily-reset job.
    pub daily_reset_cron: String,
    /// Cron expression for the cleanup job.
    pub cleanup_cron: String,
    /// Timeout applied to a single job execution.
    pub job_timeout: Duration,
    /// Timeout for starting the underlying scheduler.
    pub start_timeout: Duration,
    /// Timeout for stopping the scheduler.
    pub stop_timeout: Duration,
}

impl Default for MaintenanceSchedulerConfig {
    fn default() -> Self {
        Self {
            daily_reset_cron: DAILY_RESET_CRON.into(),
            cleanup_cron: CLEANUP_CRON.into(),
            job_timeout: Duration::from_secs(60),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
        }
    }
}

/// Maintenance scheduler with explicit lifecycle management.
pub struct MaintenanceScheduler {
    scheduler: Arc<RwLock<JobScheduler>>,
    config: MaintenanceSchedulerConfig,
    monitor_handle: Option<JoinHandle<()>>,
    cancellation: CancellationToken,
}

impl MaintenanceScheduler {
    /// Create a scheduler with the default configuration.
    pub async fn new(
        daily_reset: Arc<dyn ScheduledJob>,
        cleanup: Arc<dyn ScheduledJob>,
    ) -> SchedulerResult<Self> {
        Self::with_config(MaintenanceSchedulerConfig::default(), daily_reset, cleanup).await
    }

    /// Create a scheduler with a custom configuration.
    pub async fn with_config(
        config: MaintenanceSchedulerConfig,
        daily_reset: Arc<dyn ScheduledJob>,
        cleanup: Arc<dyn ScheduledJob>,
    ) -> SchedulerResult<Self> {
        let raw_scheduler = JobScheduler::new()
            .await
            .map_err(|err| SchedulerError::CreationFailed(err.to_string()))?;

        let scheduler = Self {
            scheduler: Arc::new(RwLock::new(raw_scheduler)),
            config,
            monitor_handle: None,
            cancellation: CancellationToken::new(),
        };

        scheduler
            .register_job(&scheduler.config.daily_reset_cron.clone(), "daily_reset", daily_reset)
            .await?;
        scheduler.register_job(&scheduler.config.cleanup_cron.clone(), "cleanup", cleanup).await?;
        Ok(scheduler)
    }

    /// Start the scheduler, spawning the monitoring task.
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let scheduler = self.scheduler.clone();
        let start_timeout = self.config.start_timeout;
        tokio::time::timeout(start_timeout, async move {
            let guard = scheduler.write().await;
            guard.start().await
        })
        .await
        .map_err(|_| SchedulerError::Timeout { seconds: start_timeout.as_secs() })?
        .map_err(|err| SchedulerError::StartFailed(err.to_string()))?;

        let cancel = self.cancellation.clone();
        let handle = tokio::spawn(async move {
            cancel.cancelled().await;
            debug!("maintenance scheduler monitor exiting");
        });

        self.monitor_handle = Some(handle);
        info!("maintenance scheduler started");
        Ok(())
    }

    /// Stop the scheduler and wait for the monitor task to finish.
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();

        let scheduler = self.scheduler.clone();
        let stop_timeout = self.config.stop_timeout;
        tokio::time::timeout(stop_timeout, async move {
            let mut guard = scheduler.write().await;
            guard.shutdown().await
        })
        .await
        .map_err(|_| SchedulerError::Timeout { seconds: stop_timeout.as_secs() })?
        .map_err(|err| SchedulerError::StopFailed(err.to_string()))?;

        if let Some(handle) = self.monitor_handle.take() {
            let stop_timeout = self.config.stop_timeout;
            tokio::time::timeout(stop_timeout, handle)
                .await
                .map_err(|_| SchedulerError::Timeout { seconds: stop_timeout.as_secs() })?
                .map_err(|err| SchedulerError::TaskJoinFailed(err.to_string()))?;
        }

        info!("maintenance scheduler stopped");
        self.cancellation = CancellationToken::new();
        Ok(())
    }

    /// Returns true when the monitor task is active.
    pub fn is_running(&self) -> bool {
        self.monitor_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    async fn register_job(
        &self,
        cron_expr: &str,
        name: &'static str,
        job: Arc<dyn ScheduledJob>,
    ) -> SchedulerResult<()> {
        let job_timeout = self.config.job_timeout;

        let definition = Job::new_async(cron_expr, move |_id, _lock| {
            let job = job.clone();
            Box::pin(async move {
                match tokio::time::timeout(job_timeout, job.run()).await {
                    Ok(Ok(())) => debug!(job = name, "maintenance job finished"),
                    Ok(Err(err)) => error!(job = name, error = %err, "maintenance job failed"),
                    Err(_) => {
                        warn!(job = name, timeout_secs = job_timeout.as_secs(), "maintenance job timed out");
                    }
                }
            })
        })
        .map_err(|err| SchedulerError::JobRegistrationFailed(err.to_string()))?;

        let scheduler = self.scheduler.write().await;
        scheduler
            .add(definition)
            .await
            .map_err(|err| SchedulerError::JobRegistrationFailed(err.to_string()))?;
        Ok(())
    }
}
