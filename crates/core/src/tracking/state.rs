//! In-memory tracking state
//!
//! Process-wide, never persisted: a restart reconstructs the state as
//! `Inactive` and implicitly drops any unflushed session. That loss is a
//! documented limitation, bounded by the periodic mid-session flush.

use chrono::{DateTime, NaiveDate, Utc};

/// Where the state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingPhase {
    /// No tab is considered active.
    Inactive,
    /// Accruing time against the active URL.
    Tracking,
    /// Suspended by platform idle/lock; the target is retained so the same
    /// URL resumes without re-detection.
    Idle,
    /// The active tab was redirected to the blocking page; no accrual.
    Blocked,
}

/// Platform idle state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleSignal {
    Active,
    Idle,
    Locked,
}

impl IdleSignal {
    /// Whether the signal suspends tracking.
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle | Self::Locked)
    }
}

/// The single in-memory state record owned by the tracker service.
#[derive(Debug, Clone)]
pub struct TrackingState {
    pub phase: TrackingPhase,
    pub active_tab_id: Option<i64>,
    pub active_url: Option<String>,
    pub active_title: String,
    /// Open-session start; `None` while no session is accruing. Advanced by
    /// mid-session flushes so intervals are never double-counted.
    pub session_start: Option<DateTime<Utc>>,
    /// Start of the continuous tracking span, for badge display. Unlike
    /// `session_start` this survives mid-session flushes.
    pub tracking_since: Option<DateTime<Utc>>,
    /// Date the session is accounted against: the date it started, even
    /// when the session crosses midnight.
    pub session_date: Option<NaiveDate>,
    /// Whether this session's visit has already been counted. A mid-session
    /// flush and an idle resume continue the same visit.
    pub visit_recorded: bool,
    pub is_idle: bool,
    pub last_flush: DateTime<Utc>,
}

impl TrackingState {
    /// Fresh cold-start state.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            phase: TrackingPhase::Inactive,
            active_tab_id: None,
            active_url: None,
            active_title: String::new(),
            session_start: None,
            tracking_since: None,
            session_date: None,
            visit_recorded: false,
            is_idle: false,
            last_flush: now,
        }
    }

    /// Drop the tracked target entirely.
    pub fn clear_target(&mut self) {
        self.active_tab_id = None;
        self.active_url = None;
        self.active_title.clear();
        self.session_start = None;
        self.tracking_since = None;
        self.session_date = None;
        self.visit_recorded = false;
    }
}
