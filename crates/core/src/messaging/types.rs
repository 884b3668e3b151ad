//! Gateway wire types
//!
//! Tags and field names match the message shapes the content/UI layers
//! already send (`CHECK_BLOCK_STATUS`, camelCase fields).

use serde::{Deserialize, Serialize};
use tabguard_domain::ExportDocument;

/// Inbound request, one closed variant per message kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum GatewayRequest {
    /// Live allow/block check for a URL.
    #[serde(rename = "CHECK_BLOCK_STATUS", rename_all = "camelCase")]
    CheckBlockStatus { url: String },

    /// Display data for the blocking page itself.
    #[serde(rename = "GET_BLOCK_INFO", rename_all = "camelCase")]
    GetBlockInfo { url: String },

    /// Liveness/visibility signal from an in-page observer.
    #[serde(rename = "PAGE_ACTIVITY", rename_all = "camelCase")]
    PageActivity {
        tab_id: i64,
        url: String,
        #[serde(default)]
        title: String,
        visible: bool,
    },

    /// Assemble the full export document.
    #[serde(rename = "EXPORT_DATA")]
    ExportData,

    /// Validate and apply an import document.
    #[serde(rename = "IMPORT_DATA", rename_all = "camelCase")]
    ImportData { payload: serde_json::Value },
}

/// Outbound response, shaped per request kind.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GatewayResponse {
    #[serde(rename_all = "camelCase")]
    BlockStatus { blocked: bool, message: String, time_spent: String, limit: String },

    #[serde(rename_all = "camelCase")]
    BlockInfo { domain: String, time_spent_seconds: u64, limit_seconds: u64, message: String },

    #[serde(rename_all = "camelCase")]
    Ack { ok: bool },

    Export(Box<ExportDocument>),

    #[serde(rename_all = "camelCase")]
    Error { error: String },
}

impl GatewayResponse {
    /// The structured reply for malformed or unknown request kinds.
    pub fn unrecognized() -> Self {
        Self::Error { error: "unrecognized request".into() }
    }
}
