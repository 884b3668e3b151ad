//! Scheduled job trait and the tracker-backed job adapters

use std::sync::Arc;

use async_trait::async_trait;
use tabguard_core::TrackerService;
use tabguard_domain::Result;

/// A unit of work driven by a scheduler.
#[async_trait]
pub trait ScheduledJob: Send + Sync {
    /// Execute the job.
    async fn run(&self) -> Result<()>;
}

/// Periodic tick into the tracking state machine.
pub struct TickJob {
    tracker: Arc<TrackerService>,
}

impl TickJob {
    pub fn new(tracker: Arc<TrackerService>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl ScheduledJob for TickJob {
    async fn run(&self) -> Result<()> {
        self.tracker.tick().await
    }
}

/// Daily-reset job: make sure a stats record exists for the new date.
pub struct DailyResetJob {
    tracker: Arc<TrackerService>,
}

impl DailyResetJob {
    pub fn new(tracker: Arc<TrackerService>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl ScheduledJob for DailyResetJob {
    async fn run(&self) -> Result<()> {
        self.tracker.ensure_daily_stats().await
    }
}

/// Retention cleanup job: purge records outside the retention window.
pub struct CleanupJob {
    tracker: Arc<TrackerService>,
}

impl CleanupJob {
    pub fn new(tracker: Arc<TrackerService>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl ScheduledJob for CleanupJob {
    async fn run(&self) -> Result<()> {
        self.tracker.run_cleanup().await
    }
}
