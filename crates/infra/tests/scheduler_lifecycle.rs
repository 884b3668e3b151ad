//! Lifecycle tests for the tick driver and the maintenance scheduler.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tabguard_domain::Result;
use tabguard_infra::scheduling::{
    MaintenanceScheduler, MaintenanceSchedulerConfig, ScheduledJob, SchedulerError, TickDriver,
};

struct CountingJob {
    runs: AtomicUsize,
}

impl CountingJob {
    fn new() -> Arc<Self> {
        Arc::new(Self { runs: AtomicUsize::new(0) })
    }

    fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScheduledJob for CountingJob {
    async fn run(&self) -> Result<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FailingJob;

#[async_trait]
impl ScheduledJob for FailingJob {
    async fn run(&self) -> Result<()> {
        Err(tabguard_domain::TabGuardError::Internal("boom".into()))
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn tick_driver_runs_the_job_until_stopped() {
    let job = CountingJob::new();
    let mut driver = TickDriver::new(job.clone(), Duration::from_millis(10));

    assert!(!driver.is_running());
    driver.start().unwrap();
    assert!(driver.is_running());

    tokio::time::sleep(Duration::from_millis(100)).await;
    driver.stop().await.unwrap();
    assert!(!driver.is_running());

    let observed = job.runs();
    assert!(observed >= 2, "expected several ticks, saw {observed}");

    // No further ticks after stop.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(job.runs(), observed);
}

#[tokio::test(flavor = "multi_thread")]
async fn tick_driver_rejects_double_start_and_stop() {
    let mut driver = TickDriver::new(CountingJob::new(), Duration::from_millis(10));

    assert!(matches!(driver.stop().await, Err(SchedulerError::NotRunning)));

    driver.start().unwrap();
    assert!(matches!(driver.start(), Err(SchedulerError::AlreadyRunning)));
    driver.stop().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn tick_driver_survives_job_failures() {
    let mut driver = TickDriver::new(Arc::new(FailingJob), Duration::from_millis(10));
    driver.start().unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;

    // Failures are logged, not fatal: the loop keeps running.
    assert!(driver.is_running());
    driver.stop().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn tick_driver_can_restart_after_stop() {
    let job = CountingJob::new();
    let mut driver = TickDriver::new(job.clone(), Duration::from_millis(10));

    driver.start().unwrap();
    tokio::time::sleep(Duration::from_millis(40)).await;
    driver.stop().await.unwrap();

    let after_first = job.runs();
    driver.start().unwrap();
    tokio::time::sleep(Duration::from_millis(40)).await;
    driver.stop().await.unwrap();
    assert!(job.runs() > after_first);
}

#[tokio::test(flavor = "multi_thread")]
async fn maintenance_scheduler_start_stop_lifecycle() {
    let mut scheduler =
        MaintenanceScheduler::new(CountingJob::new(), CountingJob::new()).await.unwrap();

    assert!(!scheduler.is_running());
    assert!(matches!(scheduler.stop().await, Err(SchedulerError::NotRunning)));

    scheduler.start().await.unwrap();
    assert!(scheduler.is_running());
    assert!(matches!(scheduler.start().await, Err(SchedulerError::AlreadyRunning)));

    scheduler.stop().await.unwrap();
    assert!(!scheduler.is_running());
}

#[tokio::test(flavor = "multi_thread")]
async fn maintenance_scheduler_runs_frequent_jobs() {
    let daily = CountingJob::new();
    let cleanup = CountingJob::new();

    // Every-second cron expressions keep the test fast.
    let config = MaintenanceSchedulerConfig {
        daily_reset_cron: "* * * * * *".into(),
        cleanup_cron: "* * * * * *".into(),
        ..MaintenanceSchedulerConfig::default()
    };
    let mut scheduler =
        MaintenanceScheduler::with_config(config, daily.clone(), cleanup.clone()).await.unwrap();

    scheduler.start().await.unwrap();
    tokio::time::sleep(Duration::from_millis(2500)).await;
    scheduler.stop().await.unwrap();

    assert!(daily.runs() >= 1, "daily reset never fired");
    assert!(cleanup.runs() >= 1, "cleanup never fired");
}
