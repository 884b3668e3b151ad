//! Tracking service - core state machine logic

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use tabguard_domain::constants::{BADGE_COLOR_PAUSED, BADGE_COLOR_TRACKING, BLOCKED_PAGE_URL};
use tabguard_domain::{badge_text, ActivityLog, DailyStats, Result, TrackingConfig};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::state::{IdleSignal, TrackingPhase, TrackingState};
use crate::limits::LimitEnforcer;
use crate::patterns;
use crate::ports::{Clock, SettingsProvider, StatsStore, TabCommands};

/// The activity tracking state machine.
///
/// All platform events funnel into the async handlers below. The in-memory
/// [`TrackingState`] sits behind one mutex, so handler invocations
/// serialize on the state; daily-stats read-modify-write cycles are
/// additionally serialized per date because gateway and maintenance paths
/// can interleave with a flush at await points.
pub struct TrackerService {
    state: Mutex<TrackingState>,
    stats: Arc<dyn StatsStore>,
    settings: Arc<dyn SettingsProvider>,
    tabs: Arc<dyn TabCommands>,
    clock: Arc<dyn Clock>,
    enforcer: Arc<LimitEnforcer>,
    config: TrackingConfig,
    date_locks: DashMap<NaiveDate, Arc<Mutex<()>>>,
}

impl TrackerService {
    /// Create a new tracker. State starts `Inactive`; any session that was
    /// open before a restart is gone.
    pub fn new(
        stats: Arc<dyn StatsStore>,
        settings: Arc<dyn SettingsProvider>,
        tabs: Arc<dyn TabCommands>,
        clock: Arc<dyn Clock>,
        enforcer: Arc<LimitEnforcer>,
        config: TrackingConfig,
    ) -> Self {
        let state = Mutex::new(TrackingState::new(clock.now()));
        Self { state, stats, settings, tabs, clock, enforcer, config, date_locks: DashMap::new() }
    }

    /// Current phase (test/diagnostic accessor).
    pub async fn phase(&self) -> TrackingPhase {
        self.state.lock().await.phase
    }

    /// Snapshot of the in-memory state (test/diagnostic accessor).
    pub async fn state_snapshot(&self) -> TrackingState {
        self.state.lock().await.clone()
    }

    /// Whether the platform currently reports the user idle.
    pub async fn is_idle(&self) -> bool {
        self.state.lock().await.is_idle
    }

    /// Number of per-date write locks currently held (test/diagnostic
    /// accessor).
    pub fn date_lock_count(&self) -> usize {
        self.date_locks.len()
    }

    /// A tab became the active target: tab activated, the tracked tab's URL
    /// changed, or window focus landed on a tab.
    pub async fn handle_target_change(&self, tab_id: i64, url: &str, title: &str) -> Result<()> {
        let settings = self.settings.get().await?;

        let mut state = self.state.lock().await;

        if !patterns::is_trackable_url(url)
            || patterns::is_excluded(url, &settings.tracking_exclusions)
        {
            debug!(url, "target not trackable, pausing");
            self.flush_session(&mut state, true).await;
            state.phase = TrackingPhase::Inactive;
            state.clear_target();
            self.refresh_badge(&state).await;
            return Ok(());
        }

        let decision = self.enforcer.check(url).await?;
        if decision.blocked {
            info!(url, tab_id, "daily limit reached, blocking tab");
            self.flush_session(&mut state, true).await;
            state.phase = TrackingPhase::Blocked;
            state.clear_target();
            if let Err(err) = self.tabs.redirect(tab_id, BLOCKED_PAGE_URL).await {
                error!(error = %err, tab_id, "failed to redirect blocked tab");
            }
            self.refresh_badge(&state).await;
            return Ok(());
        }

        if state.active_url.as_deref() != Some(url) {
            self.flush_session(&mut state, true).await;
            let now = self.clock.now();
            state.phase = TrackingPhase::Tracking;
            state.active_tab_id = Some(tab_id);
            state.active_url = Some(url.to_string());
            state.active_title = title.to_string();
            state.session_start = Some(now);
            state.tracking_since = Some(now);
            state.session_date = Some(self.clock.today());
            state.visit_recorded = false;
            state.last_flush = now;
        } else {
            // Same target re-activated. Refresh metadata; reopen the
            // session if it was paused (same logical visit).
            state.active_tab_id = Some(tab_id);
            state.active_title = title.to_string();
            if state.session_start.is_none() && !state.is_idle {
                let now = self.clock.now();
                state.phase = TrackingPhase::Tracking;
                state.session_start = Some(now);
                state.tracking_since = Some(now);
                state.session_date = Some(self.clock.today());
                state.last_flush = now;
            }
        }

        self.refresh_badge(&state).await;
        Ok(())
    }

    /// Every window lost focus: pause without switching target, so the same
    /// URL can resume when focus returns.
    pub async fn handle_window_focus_lost(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        self.flush_session(&mut state, true).await;
        state.phase = TrackingPhase::Inactive;
        self.refresh_badge(&state).await;
        Ok(())
    }

    /// Platform idle state changed.
    pub async fn handle_idle_change(&self, signal: IdleSignal) -> Result<()> {
        let mut state = self.state.lock().await;
        let was_idle = state.is_idle;
        state.is_idle = signal.is_idle();

        if state.is_idle && !was_idle {
            if state.phase == TrackingPhase::Tracking {
                self.flush_session(&mut state, true).await;
                state.phase = TrackingPhase::Idle;
            }
        } else if !state.is_idle && was_idle && state.phase == TrackingPhase::Idle {
            // Resume on the retained target. The visit was already counted
            // when the session first started, so it stays counted.
            if state.active_url.is_some() && state.session_start.is_none() {
                let now = self.clock.now();
                state.session_start = Some(now);
                state.tracking_since = Some(now);
                state.session_date = Some(self.clock.today());
                state.last_flush = now;
            }
            state.phase = TrackingPhase::Tracking;
        }

        self.refresh_badge(&state).await;
        Ok(())
    }

    /// Periodic tick: flush a long-running session once the threshold is
    /// reached, then refresh the badge.
    pub async fn tick(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.phase == TrackingPhase::Tracking {
            let now = self.clock.now();
            let since_flush = (now - state.last_flush).num_seconds();
            if since_flush >= self.config.flush_threshold_seconds as i64 {
                self.flush_session(&mut state, false).await;
            }
        }
        self.refresh_badge(&state).await;
        Ok(())
    }

    /// Daily-reset job body: make sure a stats record exists for the new
    /// date. Never touches an open session - a session spanning midnight
    /// keeps accruing to the date it started.
    pub async fn ensure_daily_stats(&self) -> Result<()> {
        let today = self.clock.today();
        let lock = self.date_lock(today);
        let _guard = lock.lock().await;
        if self.stats.get_daily_stats(today).await?.is_none() {
            let empty = DailyStats::empty(today, self.clock.now());
            self.stats.save_daily_stats(&empty).await?;
            info!(date = %today, "created empty daily stats record");
        }
        Ok(())
    }

    /// Cleanup job body: purge records older than the retention window.
    pub async fn run_cleanup(&self) -> Result<()> {
        let settings = self.settings.get().await?;
        let cutoff = self.clock.today()
            - chrono::Duration::days(i64::from(settings.data_retention_days));
        let removed = self.stats.purge_older_than(cutoff).await?;
        // Locks for purged dates will never be contended again.
        self.date_locks.retain(|date, _| *date >= cutoff);
        if removed > 0 {
            info!(%cutoff, removed, "purged expired activity data");
        }
        Ok(())
    }

    /// Visibility signal from an in-page observer. Equivalent to a target
    /// change when the page is visible and the user is not idle.
    pub async fn handle_page_activity(
        &self,
        tab_id: i64,
        url: &str,
        title: &str,
        visible: bool,
    ) -> Result<()> {
        if !visible || self.is_idle().await {
            return Ok(());
        }
        self.handle_target_change(tab_id, url, title).await
    }

    /// Flush the open session, if any. `end` closes the session; otherwise
    /// the timers advance and the session keeps running so repeated flushes
    /// never double-count an interval.
    ///
    /// Storage failures are logged and the interval's data is dropped; the
    /// state machine moves on rather than retrying.
    async fn flush_session(&self, state: &mut TrackingState, end: bool) {
        let Some(start) = state.session_start else {
            return;
        };
        let now = self.clock.now();
        let elapsed = (now - start).num_seconds();

        // Advance timers up front: even on storage failure the interval is
        // considered consumed.
        if end {
            state.session_start = None;
            state.tracking_since = None;
        } else {
            state.session_start = Some(now);
        }
        state.last_flush = now;

        if elapsed < self.config.min_session_seconds as i64 {
            return;
        }
        let elapsed = elapsed as u64;

        let Some(url) = state.active_url.clone() else {
            return;
        };
        let domain = patterns::extract_domain(&url);
        if domain.is_empty() {
            return;
        }
        let date = state.session_date.unwrap_or_else(|| self.clock.today());
        let count_visit = !state.visit_recorded;
        state.visit_recorded = true;
        let title = state.active_title.clone();

        let entry = ActivityLog {
            id: Uuid::new_v4(),
            url,
            domain: domain.clone(),
            title: title.clone(),
            timestamp_start: start,
            duration_seconds: elapsed,
            date,
        };
        if let Err(err) = self.stats.append_activity_log(entry).await {
            error!(error = %err, %domain, "failed to append activity log, dropping interval");
            return;
        }

        if let Err(err) =
            self.apply_to_daily_stats(date, &domain, &title, elapsed, count_visit).await
        {
            error!(error = %err, %domain, "failed to update daily stats");
        }
    }

    /// Read-modify-write of one date's stats record, serialized per date.
    async fn apply_to_daily_stats(
        &self,
        date: NaiveDate,
        domain: &str,
        title: &str,
        elapsed: u64,
        count_visit: bool,
    ) -> Result<()> {
        let lock = self.date_lock(date);
        let _guard = lock.lock().await;

        let now = self.clock.now();
        let mut stats = self
            .stats
            .get_daily_stats(date)
            .await?
            .unwrap_or_else(|| DailyStats::empty(date, now));

        let usage = stats.site_breakdown.entry(domain.to_string()).or_default();
        usage.time_seconds += elapsed;
        if count_visit {
            usage.visit_count += 1;
        }
        usage.last_known_title = title.to_string();
        stats.total_time_seconds += elapsed;
        stats.last_updated = now;

        self.stats.save_daily_stats(&stats).await
    }

    fn date_lock(&self, date: NaiveDate) -> Arc<Mutex<()>> {
        self.date_locks.entry(date).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
    }

    /// Push the elapsed-time badge. Badge failures are logged only; the
    /// badge is cosmetic.
    ///
    /// Elapsed time is measured from `tracking_since`, not the
    /// flush-advanced `session_start`, so the badge keeps counting across
    /// mid-session flushes.
    async fn refresh_badge(&self, state: &TrackingState) {
        let (text, color) = match (state.phase, state.tracking_since) {
            (TrackingPhase::Tracking, Some(since)) => {
                let elapsed = (self.clock.now() - since).num_seconds().max(0) as u64;
                (badge_text(elapsed), BADGE_COLOR_TRACKING)
            }
            _ => (String::new(), BADGE_COLOR_PAUSED),
        };
        if let Err(err) = self.tabs.set_badge(&text, color).await {
            warn!(error = %err, "failed to update badge");
        }
    }
}
