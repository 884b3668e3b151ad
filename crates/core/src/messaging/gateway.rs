//! Gateway request dispatch

use std::sync::Arc;

use tabguard_domain::{format_short_duration, Result};
use tracing::error;

use super::types::{GatewayRequest, GatewayResponse};
use crate::export::TransferService;
use crate::limits::LimitEnforcer;
use crate::patterns;
use crate::tracking::TrackerService;

/// Answers synchronous-looking queries from content/UI surfaces using the
/// enforcer, the tracker, and the transfer service. Queries never mutate
/// tracking state except `PAGE_ACTIVITY`, which is an explicit trigger.
pub struct MessageGateway {
    tracker: Arc<TrackerService>,
    enforcer: Arc<LimitEnforcer>,
    transfer: Arc<TransferService>,
}

impl MessageGateway {
    /// Create a gateway over the given collaborators.
    pub fn new(
        tracker: Arc<TrackerService>,
        enforcer: Arc<LimitEnforcer>,
        transfer: Arc<TransferService>,
    ) -> Self {
        Self { tracker, enforcer, transfer }
    }

    /// Entry point for raw payloads from the platform message channel.
    /// Anything that does not parse as a known request kind gets the
    /// structured "unrecognized request" reply.
    pub async fn handle_value(&self, payload: serde_json::Value) -> GatewayResponse {
        match serde_json::from_value::<GatewayRequest>(payload) {
            Ok(request) => self.handle(request).await,
            Err(_) => GatewayResponse::unrecognized(),
        }
    }

    /// Dispatch a parsed request. Internal failures are logged and surface
    /// as a structured error so the caller is never left hanging.
    pub async fn handle(&self, request: GatewayRequest) -> GatewayResponse {
        let result = match request {
            GatewayRequest::CheckBlockStatus { url } => self.check_block_status(&url).await,
            GatewayRequest::GetBlockInfo { url } => self.block_info(&url).await,
            GatewayRequest::PageActivity { tab_id, url, title, visible } => self
                .tracker
                .handle_page_activity(tab_id, &url, &title, visible)
                .await
                .map(|()| GatewayResponse::Ack { ok: true }),
            GatewayRequest::ExportData => {
                self.transfer.export().await.map(|doc| GatewayResponse::Export(Box::new(doc)))
            }
            GatewayRequest::ImportData { payload } => {
                self.transfer.import(payload).await.map(|()| GatewayResponse::Ack { ok: true })
            }
        };

        result.unwrap_or_else(|err| {
            error!(error = %err, "gateway request failed");
            GatewayResponse::Error { error: err.to_string() }
        })
    }

    async fn check_block_status(&self, url: &str) -> Result<GatewayResponse> {
        let decision = self.enforcer.check(url).await?;
        let domain = patterns::extract_domain(url);
        Ok(GatewayResponse::BlockStatus {
            blocked: decision.blocked,
            message: limit_message(&domain),
            time_spent: format_short_duration(decision.time_spent_seconds),
            limit: decision
                .limit
                .map_or_else(|| "Unknown".to_string(), |l| format_short_duration(l.daily_limit_seconds)),
        })
    }

    async fn block_info(&self, url: &str) -> Result<GatewayResponse> {
        let decision = self.enforcer.check(url).await?;
        let domain = patterns::extract_domain(url);
        Ok(GatewayResponse::BlockInfo {
            message: limit_message(&domain),
            domain,
            time_spent_seconds: decision.time_spent_seconds,
            limit_seconds: decision.limit.map_or(0, |l| l.daily_limit_seconds),
        })
    }
}

fn limit_message(domain: &str) -> String {
    format!("You've reached your daily time limit for {domain}")
}
