//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FLUSH_THRESHOLD_SECS, DEFAULT_TICK_INTERVAL_SECS, MIN_SESSION_SECS,
};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub database: DatabaseConfig,
    pub tracking: TrackingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// Activity tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Cadence of the periodic tick, in seconds.
    pub tick_interval_seconds: u64,
    /// A still-open session is flushed once this much time has accrued
    /// since the last flush, so a crash loses at most this window.
    pub flush_threshold_seconds: u64,
    /// Sessions shorter than this are discarded rather than recorded.
    pub min_session_seconds: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig { path: "tabguard.db".to_string(), pool_size: 4 },
            tracking: TrackingConfig::default(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            tick_interval_seconds: DEFAULT_TICK_INTERVAL_SECS,
            flush_threshold_seconds: DEFAULT_FLUSH_THRESHOLD_SECS,
            min_session_seconds: MIN_SESSION_SECS,
        }
    }
}
