//! Export/import document shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ActivityLog, SiteLimit, TrackerSettings};

/// The single structured document produced by a data export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub activity_logs: Vec<ActivityLog>,
    pub site_limits: Vec<SiteLimit>,
    pub settings: TrackerSettings,
    pub export_date: DateTime<Utc>,
}

/// Inbound import document. Every section is optional; absent sections
/// leave the corresponding stored data untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    pub activity_logs: Option<Vec<ActivityLog>>,
    pub site_limits: Option<Vec<SiteLimit>>,
    pub settings: Option<TrackerSettings>,
}
