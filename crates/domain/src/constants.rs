//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// URL classification
pub const TRACKABLE_SCHEMES: [&str; 3] = ["http:", "https:", "file:"];
pub const INTERNAL_SCHEME_PREFIXES: [&str; 2] = ["chrome://", "chrome-extension://"];
pub const BLANK_PAGE_URL: &str = "about:blank";

/// Page the active tab is redirected to when a limit is hit.
pub const BLOCKED_PAGE_URL: &str = "chrome-extension://tabguard/blocked.html";

// Tracking cadence
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 1;
pub const DEFAULT_FLUSH_THRESHOLD_SECS: u64 = 30;
/// Sessions shorter than this are never recorded.
pub const MIN_SESSION_SECS: u64 = 1;

// Maintenance schedule (cron, seconds-resolution)
pub const DAILY_RESET_CRON: &str = "0 0 0 * * *";
pub const CLEANUP_CRON: &str = "0 0 * * * *";

// Badge presentation
pub const BADGE_COLOR_TRACKING: &str = "#10b981";
pub const BADGE_COLOR_PAUSED: &str = "#9ca3af";

// Settings defaults
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_RETENTION_DAYS: u32 = 90;
pub const DEFAULT_EXCLUSIONS: [&str; 2] = ["localhost", "127.0.0.1"];
