//! User-facing tracker settings

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXCLUSIONS, DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_RETENTION_DAYS};

/// UI color theme. Persisted with the settings record; the engine itself
/// never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Settings record, stored as a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSettings {
    /// Seconds of inactivity before the platform reports the user idle.
    pub idle_timeout_seconds: u64,
    /// Domains (including subdomains) never tracked.
    pub tracking_exclusions: Vec<String>,
    /// Stats and activity logs older than this many days are purged.
    pub data_retention_days: u32,
    pub theme: Theme,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            idle_timeout_seconds: DEFAULT_IDLE_TIMEOUT_SECS,
            tracking_exclusions: DEFAULT_EXCLUSIONS.iter().map(ToString::to_string).collect(),
            data_retention_days: DEFAULT_RETENTION_DAYS,
            theme: Theme::Light,
        }
    }
}
