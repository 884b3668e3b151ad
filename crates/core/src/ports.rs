//! Port interfaces for the tracking engine
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tabguard_domain::{ActivityLog, DailyStats, Result, SiteLimit, SiteLimitPatch, TrackerSettings};

/// Trait for the durable per-day statistics and activity-log store.
///
/// The store exposes whole-record get/set semantics only: there is no
/// partial-update API, so callers read-modify-write full [`DailyStats`]
/// records and the core is responsible for serializing those cycles per
/// date.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Fetch the aggregate record for one date, if it exists.
    async fn get_daily_stats(&self, date: NaiveDate) -> Result<Option<DailyStats>>;

    /// Overwrite the full record for `stats.date`. Idempotent.
    async fn save_daily_stats(&self, stats: &DailyStats) -> Result<()>;

    /// Append one immutable activity-log entry.
    async fn append_activity_log(&self, entry: ActivityLog) -> Result<()>;

    /// Activity-log entries whose date falls in `[from, to]`, oldest first.
    async fn activity_logs_for_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ActivityLog>>;

    /// Every stored activity-log entry, oldest first.
    async fn all_activity_logs(&self) -> Result<Vec<ActivityLog>>;

    /// Replace the entire activity log wholesale (import path).
    async fn replace_activity_logs(&self, entries: Vec<ActivityLog>) -> Result<()>;

    /// Delete stats records and log entries dated strictly before `cutoff`.
    /// Returns the number of records removed.
    async fn purge_older_than(&self, cutoff: NaiveDate) -> Result<usize>;
}

/// Trait for the ordered collection of user-defined site limits.
#[async_trait]
pub trait LimitsRepository: Send + Sync {
    /// Append a limit to the collection.
    async fn add(&self, limit: SiteLimit) -> Result<()>;

    /// Apply a partial update to the limit with the given id.
    async fn update(&self, id: uuid::Uuid, patch: SiteLimitPatch) -> Result<()>;

    /// Remove the limit with the given id.
    async fn remove(&self, id: uuid::Uuid) -> Result<()>;

    /// All limits in stored order (insertion order unless edited).
    async fn list(&self) -> Result<Vec<SiteLimit>>;

    /// Replace the whole collection wholesale (import path).
    async fn replace_all(&self, limits: Vec<SiteLimit>) -> Result<()>;
}

/// Trait for reading and writing the settings record.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Current settings; defaults when nothing has been stored yet.
    async fn get(&self) -> Result<TrackerSettings>;

    /// Persist the full settings record.
    async fn save(&self, settings: &TrackerSettings) -> Result<()>;
}

/// Outbound platform capabilities the engine drives.
#[async_trait]
pub trait TabCommands: Send + Sync {
    /// Replace the tab's location, used to send a tab to the blocking page.
    async fn redirect(&self, tab_id: i64, url: &str) -> Result<()>;

    /// Update the visible badge text and background color.
    async fn set_badge(&self, text: &str, color: &str) -> Result<()>;
}

/// Time source, injected so the state machine is deterministic under test.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current local calendar date. Daily records are keyed by this, so
    /// "today" follows the user's wall clock rather than UTC.
    fn today(&self) -> NaiveDate;
}
