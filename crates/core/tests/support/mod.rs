//! Shared test fixtures for core integration tests

#![allow(dead_code)]

pub mod repositories;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use parking_lot::Mutex;
use tabguard_core::ports::Clock;
use tabguard_core::{LimitEnforcer, LimitRegistry, MessageGateway, TrackerService, TransferService};
use tabguard_domain::{MatchType, SiteLimit, TrackingConfig};
use uuid::Uuid;

use repositories::{InMemoryLimits, InMemorySettings, InMemoryStatsStore, RecordingTabs};

/// Deterministic clock the tests advance by hand.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Start at a fixed, arbitrary instant.
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap())
    }

    pub fn at(start: DateTime<Utc>) -> Self {
        Self { now: Arc::new(Mutex::new(start)) }
    }

    /// Move the clock forward.
    pub fn advance_secs(&self, seconds: i64) {
        let mut now = self.now.lock();
        *now += chrono::Duration::seconds(seconds);
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }

    fn today(&self) -> NaiveDate {
        self.now.lock().date_naive()
    }
}

/// Fully wired engine over in-memory fakes.
pub struct Harness {
    pub clock: ManualClock,
    pub stats: Arc<InMemoryStatsStore>,
    pub limits: Arc<InMemoryLimits>,
    pub settings: Arc<InMemorySettings>,
    pub tabs: Arc<RecordingTabs>,
    pub tracker: Arc<TrackerService>,
    pub enforcer: Arc<LimitEnforcer>,
    pub registry: Arc<LimitRegistry>,
    pub transfer: Arc<TransferService>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = ManualClock::new();
        let stats = Arc::new(InMemoryStatsStore::default());
        let limits = Arc::new(InMemoryLimits::default());
        let settings = Arc::new(InMemorySettings::default());
        let tabs = Arc::new(RecordingTabs::default());

        let registry = Arc::new(LimitRegistry::new(limits.clone()));
        let enforcer = Arc::new(LimitEnforcer::new(
            registry.clone(),
            stats.clone(),
            Arc::new(clock.clone()),
        ));
        let tracker = Arc::new(TrackerService::new(
            stats.clone(),
            settings.clone(),
            tabs.clone(),
            Arc::new(clock.clone()),
            enforcer.clone(),
            TrackingConfig::default(),
        ));
        let transfer = Arc::new(TransferService::new(
            stats.clone(),
            limits.clone(),
            settings.clone(),
            Arc::new(clock.clone()),
        ));

        Self { clock, stats, limits, settings, tabs, tracker, enforcer, registry, transfer }
    }

    pub fn gateway(&self) -> MessageGateway {
        MessageGateway::new(self.tracker.clone(), self.enforcer.clone(), self.transfer.clone())
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

/// Convenience builder for a domain-match limit.
pub fn domain_limit(pattern: &str, daily_limit_seconds: u64) -> SiteLimit {
    SiteLimit {
        id: Uuid::new_v4(),
        pattern: pattern.to_string(),
        match_type: MatchType::Domain,
        daily_limit_seconds,
        enabled: true,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// Convenience builder for a regex-match limit.
pub fn regex_limit(pattern: &str, daily_limit_seconds: u64) -> SiteLimit {
    SiteLimit { match_type: MatchType::Regex, ..domain_limit(pattern, daily_limit_seconds) }
}
