//! Activity and statistics record types

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded span of activity on one URL.
///
/// Immutable once written: an entry is created only when an active session
/// of at least one second ends (target change, pause) or is flushed
/// mid-session, and is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: Uuid,
    pub url: String,
    pub domain: String,
    pub title: String,
    /// Start of the recorded span.
    pub timestamp_start: DateTime<Utc>,
    pub duration_seconds: u64,
    /// Calendar date the span is accounted against (the date the session
    /// started, even when the span crosses midnight).
    pub date: NaiveDate,
}

/// Per-domain slice of a day's usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteUsage {
    pub time_seconds: u64,
    /// Distinct session starts on this domain within the day. A mid-session
    /// flush continues the same visit and must not increment this.
    pub visit_count: u64,
    pub last_known_title: String,
}

/// Aggregated usage for one calendar date, keyed by domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: NaiveDate,
    /// Invariant: equals the sum of all `site_breakdown` time values.
    pub total_time_seconds: u64,
    pub site_breakdown: BTreeMap<String, SiteUsage>,
    pub last_updated: DateTime<Utc>,
}

impl DailyStats {
    /// Create an empty record for the given date.
    pub fn empty(date: NaiveDate, now: DateTime<Utc>) -> Self {
        Self { date, total_time_seconds: 0, site_breakdown: BTreeMap::new(), last_updated: now }
    }

    /// Accumulated time for one domain, zero when the domain is absent.
    pub fn time_for_domain(&self, domain: &str) -> u64 {
        self.site_breakdown.get(domain).map_or(0, |usage| usage.time_seconds)
    }
}
