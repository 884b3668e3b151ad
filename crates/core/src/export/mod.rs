//! Data export and import
//!
//! Export assembles a single structured document; import validates the
//! whole document field-by-field before any destructive replace, so a bad
//! document leaves existing data intact.

use std::sync::Arc;

use tabguard_domain::{
    ActivityLog, ExportDocument, ImportDocument, MatchType, Result, SiteLimit, TabGuardError,
};
use tracing::info;

use crate::patterns;
use crate::ports::{Clock, LimitsRepository, SettingsProvider, StatsStore};

/// Export/import over the three record stores.
pub struct TransferService {
    stats: Arc<dyn StatsStore>,
    limits: Arc<dyn LimitsRepository>,
    settings: Arc<dyn SettingsProvider>,
    clock: Arc<dyn Clock>,
}

impl TransferService {
    /// Create a transfer service over the given stores.
    pub fn new(
        stats: Arc<dyn StatsStore>,
        limits: Arc<dyn LimitsRepository>,
        settings: Arc<dyn SettingsProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { stats, limits, settings, clock }
    }

    /// Assemble the full export document.
    pub async fn export(&self) -> Result<ExportDocument> {
        Ok(ExportDocument {
            activity_logs: self.stats.all_activity_logs().await?,
            site_limits: self.limits.list().await?,
            settings: self.settings.get().await?,
            export_date: self.clock.now(),
        })
    }

    /// Validate and apply an import document.
    ///
    /// Sections present in the document are replaced wholesale; absent
    /// sections leave the corresponding stored data untouched. Validation
    /// of every section completes before the first write.
    pub async fn import(&self, payload: serde_json::Value) -> Result<()> {
        let document: ImportDocument = serde_json::from_value(payload)
            .map_err(|err| TabGuardError::Import(format!("malformed document: {err}")))?;

        if let Some(logs) = &document.activity_logs {
            validate_logs(logs)?;
        }
        if let Some(limits) = &document.site_limits {
            validate_limits(limits)?;
        }

        if let Some(logs) = document.activity_logs {
            let count = logs.len();
            self.stats.replace_activity_logs(logs).await?;
            info!(count, "imported activity logs");
        }
        if let Some(limits) = document.site_limits {
            let count = limits.len();
            self.limits.replace_all(limits).await?;
            info!(count, "imported site limits");
        }
        if let Some(settings) = document.settings {
            self.settings.save(&settings).await?;
            info!("imported settings");
        }
        Ok(())
    }
}

fn validate_logs(logs: &[ActivityLog]) -> Result<()> {
    for (index, log) in logs.iter().enumerate() {
        if log.url.is_empty() {
            return Err(TabGuardError::Import(format!("activity log {index}: empty url")));
        }
        if log.domain.is_empty() {
            return Err(TabGuardError::Import(format!("activity log {index}: empty domain")));
        }
    }
    Ok(())
}

fn validate_limits(limits: &[SiteLimit]) -> Result<()> {
    for (index, limit) in limits.iter().enumerate() {
        if limit.pattern.trim().is_empty() {
            return Err(TabGuardError::Import(format!("site limit {index}: empty pattern")));
        }
        if limit.match_type == MatchType::Regex && !patterns::is_valid_regex(&limit.pattern) {
            return Err(TabGuardError::Import(format!(
                "site limit {index}: invalid regex pattern {:?}",
                limit.pattern
            )));
        }
    }
    Ok(())
}
