//! In-memory mock implementations of the core ports
//!
//! Deterministic stand-ins for the storage and platform adapters, enabling
//! state-machine tests without a database or browser.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use tabguard_core::ports::{LimitsRepository, SettingsProvider, StatsStore, TabCommands};
use tabguard_domain::{
    ActivityLog, DailyStats, Result, SiteLimit, SiteLimitPatch, TabGuardError, TrackerSettings,
};
use uuid::Uuid;

/// In-memory stats store. Set `fail_writes` to simulate storage outages.
#[derive(Default)]
pub struct InMemoryStatsStore {
    pub daily: Mutex<HashMap<NaiveDate, DailyStats>>,
    pub logs: Mutex<Vec<ActivityLog>>,
    pub fail_writes: Mutex<bool>,
}

impl InMemoryStatsStore {
    pub fn stats_for(&self, date: NaiveDate) -> Option<DailyStats> {
        self.daily.lock().get(&date).cloned()
    }

    pub fn log_count(&self) -> usize {
        self.logs.lock().len()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }

    fn check_writable(&self) -> Result<()> {
        if *self.fail_writes.lock() {
            Err(TabGuardError::Storage("simulated write failure".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StatsStore for InMemoryStatsStore {
    async fn get_daily_stats(&self, date: NaiveDate) -> Result<Option<DailyStats>> {
        Ok(self.daily.lock().get(&date).cloned())
    }

    async fn save_daily_stats(&self, stats: &DailyStats) -> Result<()> {
        self.check_writable()?;
        self.daily.lock().insert(stats.date, stats.clone());
        Ok(())
    }

    async fn append_activity_log(&self, entry: ActivityLog) -> Result<()> {
        self.check_writable()?;
        self.logs.lock().push(entry);
        Ok(())
    }

    async fn activity_logs_for_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ActivityLog>> {
        Ok(self
            .logs
            .lock()
            .iter()
            .filter(|log| log.date >= from && log.date <= to)
            .cloned()
            .collect())
    }

    async fn all_activity_logs(&self) -> Result<Vec<ActivityLog>> {
        Ok(self.logs.lock().clone())
    }

    async fn replace_activity_logs(&self, entries: Vec<ActivityLog>) -> Result<()> {
        self.check_writable()?;
        *self.logs.lock() = entries;
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: NaiveDate) -> Result<usize> {
        self.check_writable()?;
        let mut removed = 0;
        {
            let mut daily = self.daily.lock();
            let before = daily.len();
            daily.retain(|date, _| *date >= cutoff);
            removed += before - daily.len();
        }
        {
            let mut logs = self.logs.lock();
            let before = logs.len();
            logs.retain(|log| log.date >= cutoff);
            removed += before - logs.len();
        }
        Ok(removed)
    }
}

/// In-memory limit collection preserving insertion order.
#[derive(Default)]
pub struct InMemoryLimits {
    pub limits: Mutex<Vec<SiteLimit>>,
}

impl InMemoryLimits {
    pub fn seeded(limits: Vec<SiteLimit>) -> Self {
        Self { limits: Mutex::new(limits) }
    }

    pub fn push(&self, limit: SiteLimit) {
        self.limits.lock().push(limit);
    }
}

#[async_trait]
impl LimitsRepository for InMemoryLimits {
    async fn add(&self, limit: SiteLimit) -> Result<()> {
        self.limits.lock().push(limit);
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: SiteLimitPatch) -> Result<()> {
        let mut limits = self.limits.lock();
        let limit = limits
            .iter_mut()
            .find(|limit| limit.id == id)
            .ok_or_else(|| TabGuardError::NotFound(format!("site limit {id}")))?;
        patch.apply_to(limit);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        self.limits.lock().retain(|limit| limit.id != id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SiteLimit>> {
        Ok(self.limits.lock().clone())
    }

    async fn replace_all(&self, limits: Vec<SiteLimit>) -> Result<()> {
        *self.limits.lock() = limits;
        Ok(())
    }
}

/// In-memory settings record, defaulting like a fresh profile.
#[derive(Default)]
pub struct InMemorySettings {
    pub stored: Mutex<Option<TrackerSettings>>,
}

impl InMemorySettings {
    pub fn set(&self, settings: TrackerSettings) {
        *self.stored.lock() = Some(settings);
    }
}

#[async_trait]
impl SettingsProvider for InMemorySettings {
    async fn get(&self) -> Result<TrackerSettings> {
        Ok(self.stored.lock().clone().unwrap_or_default())
    }

    async fn save(&self, settings: &TrackerSettings) -> Result<()> {
        *self.stored.lock() = Some(settings.clone());
        Ok(())
    }
}

/// Records outbound platform calls instead of performing them.
#[derive(Default)]
pub struct RecordingTabs {
    pub redirects: Mutex<Vec<(i64, String)>>,
    pub badges: Mutex<Vec<(String, String)>>,
}

impl RecordingTabs {
    pub fn redirect_count(&self) -> usize {
        self.redirects.lock().len()
    }

    pub fn last_redirect(&self) -> Option<(i64, String)> {
        self.redirects.lock().last().cloned()
    }

    pub fn last_badge(&self) -> Option<(String, String)> {
        self.badges.lock().last().cloned()
    }
}

#[async_trait]
impl TabCommands for RecordingTabs {
    async fn redirect(&self, tab_id: i64, url: &str) -> Result<()> {
        self.redirects.lock().push((tab_id, url.to_string()));
        Ok(())
    }

    async fn set_badge(&self, text: &str, color: &str) -> Result<()> {
        self.badges.lock().push((text.to_string(), color.to_string()));
        Ok(())
    }
}
