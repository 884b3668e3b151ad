//! Validated access to the stored limit collection

use std::sync::Arc;

use tabguard_domain::{MatchType, Result, SiteLimit, SiteLimitPatch, TabGuardError};
use uuid::Uuid;

use crate::patterns;
use crate::ports::LimitsRepository;

/// Thin service over [`LimitsRepository`] adding input validation and
/// first-match lookup. The stored order is the tie-break order: when two
/// rules match the same URL, the one stored earlier governs.
pub struct LimitRegistry {
    repository: Arc<dyn LimitsRepository>,
}

impl LimitRegistry {
    /// Create a registry over the given repository.
    pub fn new(repository: Arc<dyn LimitsRepository>) -> Self {
        Self { repository }
    }

    /// Add a limit after validating its pattern.
    pub async fn add(&self, limit: SiteLimit) -> Result<()> {
        validate_pattern(&limit.pattern, limit.match_type)?;
        self.repository.add(limit).await
    }

    /// Apply a partial update, validating any new pattern against the
    /// rule's (possibly also updated) match type.
    pub async fn update(&self, id: Uuid, patch: SiteLimitPatch) -> Result<()> {
        if let Some(pattern) = &patch.pattern {
            let existing = self
                .repository
                .list()
                .await?
                .into_iter()
                .find(|limit| limit.id == id)
                .ok_or_else(|| TabGuardError::NotFound(format!("site limit {id}")))?;
            let match_type = patch.match_type.unwrap_or(existing.match_type);
            validate_pattern(pattern, match_type)?;
        }
        self.repository.update(id, patch).await
    }

    /// Remove a limit by id.
    pub async fn remove(&self, id: Uuid) -> Result<()> {
        self.repository.remove(id).await
    }

    /// All limits in stored order.
    pub async fn list(&self) -> Result<Vec<SiteLimit>> {
        self.repository.list().await
    }

    /// The first enabled limit (in stored order) whose pattern matches the
    /// URL, if any.
    pub async fn first_match(&self, url: &str) -> Result<Option<SiteLimit>> {
        let limits = self.repository.list().await?;
        Ok(limits
            .into_iter()
            .filter(|limit| limit.enabled)
            .find(|limit| patterns::matches(url, &limit.pattern, limit.match_type)))
    }
}

fn validate_pattern(pattern: &str, match_type: MatchType) -> Result<()> {
    if pattern.trim().is_empty() {
        return Err(TabGuardError::InvalidInput("limit pattern must not be empty".into()));
    }
    if match_type == MatchType::Regex && !patterns::is_valid_regex(pattern) {
        return Err(TabGuardError::InvalidInput(format!(
            "invalid regular expression pattern: {pattern}"
        )));
    }
    Ok(())
}
