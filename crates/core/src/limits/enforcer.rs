//! Enforcement decision
//!
//! Given a URL, decide whether navigation should be blocked: the first
//! enabled limit in stored order governs, compared against the time already
//! accrued today for the URL's domain.

use std::sync::Arc;

use tabguard_domain::{BlockDecision, Result};

use crate::limits::LimitRegistry;
use crate::patterns;
use crate::ports::{Clock, StatsStore};

/// Evaluates limit rules against live daily stats.
pub struct LimitEnforcer {
    registry: Arc<LimitRegistry>,
    stats: Arc<dyn StatsStore>,
    clock: Arc<dyn Clock>,
}

impl LimitEnforcer {
    /// Create an enforcer over the given collaborators.
    pub fn new(
        registry: Arc<LimitRegistry>,
        stats: Arc<dyn StatsStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { registry, stats, clock }
    }

    /// Decide allow/block for a URL. Read-only: mutates nothing.
    pub async fn check(&self, url: &str) -> Result<BlockDecision> {
        let time_spent = self.time_spent_today(url).await?;

        let Some(limit) = self.registry.first_match(url).await? else {
            return Ok(BlockDecision::allow_unmatched(time_spent));
        };

        // A zero budget means "block entirely", independent of accrual.
        let blocked =
            limit.daily_limit_seconds == 0 || time_spent >= limit.daily_limit_seconds;

        Ok(BlockDecision { blocked, limit: Some(limit), time_spent_seconds: time_spent })
    }

    /// Seconds accrued today against the URL's domain. Zero for URLs whose
    /// domain cannot be extracted or that have no record yet.
    pub async fn time_spent_today(&self, url: &str) -> Result<u64> {
        let domain = patterns::extract_domain(url);
        if domain.is_empty() {
            return Ok(0);
        }
        let today = self.clock.today();
        let stats = self.stats.get_daily_stats(today).await?;
        Ok(stats.map_or(0, |record| record.time_for_domain(&domain)))
    }
}
