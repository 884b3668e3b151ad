//! Site limit rules and enforcement decisions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a limit's pattern is interpreted against a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Pattern is a domain; matches the hostname and any subdomain of it.
    Domain,
    /// Pattern is a regular expression tested against the full URL.
    Regex,
}

/// A user-defined daily time budget for matching sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteLimit {
    pub id: Uuid,
    pub pattern: String,
    pub match_type: MatchType,
    /// Daily budget in seconds. Zero means "block entirely".
    pub daily_limit_seconds: u64,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update applied to an existing [`SiteLimit`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteLimitPatch {
    pub pattern: Option<String>,
    pub match_type: Option<MatchType>,
    pub daily_limit_seconds: Option<u64>,
    pub enabled: Option<bool>,
}

impl SiteLimitPatch {
    /// Apply this patch to a limit in place.
    pub fn apply_to(&self, limit: &mut SiteLimit) {
        if let Some(pattern) = &self.pattern {
            limit.pattern = pattern.clone();
        }
        if let Some(match_type) = self.match_type {
            limit.match_type = match_type;
        }
        if let Some(daily_limit) = self.daily_limit_seconds {
            limit.daily_limit_seconds = daily_limit;
        }
        if let Some(enabled) = self.enabled {
            limit.enabled = enabled;
        }
    }
}

/// Outcome of evaluating the limit rules against a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDecision {
    pub blocked: bool,
    /// The governing rule, when one matched (first enabled match in
    /// registry order).
    pub limit: Option<SiteLimit>,
    /// Time already accrued today against the URL's domain.
    pub time_spent_seconds: u64,
}

impl BlockDecision {
    /// Decision for a URL no enabled rule matches.
    pub fn allow_unmatched(time_spent_seconds: u64) -> Self {
        Self { blocked: false, limit: None, time_spent_seconds }
    }
}
