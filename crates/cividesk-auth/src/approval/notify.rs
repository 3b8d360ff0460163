//! Best-effort approval-outcome notifications.
//!
//! Notification is an external side channel. Callers fire it in a detached
//! task after the approval/rejection transition has committed; a delivery
//! failure is logged and never rolls back or blocks the transition.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use cividesk_core::config::approval::ApprovalConfig;
use cividesk_core::error::AppError;
use cividesk_entity::account::Account;

/// The approval decision being announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalOutcome {
    /// The account may now log in.
    Approved,
    /// The account was refused.
    Rejected,
}

/// Delivers approval outcomes to an external channel.
#[async_trait]
pub trait ApprovalNotifier: Send + Sync {
    /// Attempt delivery once; no retries.
    async fn notify(&self, account: &Account, outcome: ApprovalOutcome) -> Result<(), AppError>;
}

/// Notifier that only logs the outcome. Used when no webhook is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl ApprovalNotifier for LogNotifier {
    async fn notify(&self, account: &Account, outcome: ApprovalOutcome) -> Result<(), AppError> {
        info!(
            account_id = %account.id,
            email = %account.email,
            outcome = ?outcome,
            "Approval outcome recorded (no webhook configured)"
        );
        Ok(())
    }
}

/// Notifier that POSTs the outcome to a configured webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    /// Creates a webhook notifier for the given URL.
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl ApprovalNotifier for WebhookNotifier {
    async fn notify(&self, account: &Account, outcome: ApprovalOutcome) -> Result<(), AppError> {
        let payload = serde_json::json!({
            "account_id": account.id,
            "email": account.email,
            "username": account.username,
            "outcome": outcome,
        });

        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| AppError::internal(format!("Approval webhook delivery failed: {e}")))?;

        Ok(())
    }
}

/// Builds the configured notifier.
pub fn from_config(config: &ApprovalConfig) -> Arc<dyn ApprovalNotifier> {
    if config.webhook_url.is_empty() {
        Arc::new(LogNotifier)
    } else {
        Arc::new(WebhookNotifier::new(config.webhook_url.clone()))
    }
}

/// Fire-and-forget delivery wrapper used by the approval handlers.
///
/// Spawns the send so the HTTP response never waits on the side channel;
/// failures are logged with the account id.
pub fn notify_detached(
    notifier: Arc<dyn ApprovalNotifier>,
    account: Account,
    outcome: ApprovalOutcome,
) {
    tokio::spawn(async move {
        if let Err(e) = notifier.notify(&account, outcome).await {
            error!(
                account_id = %account.id,
                error = %e,
                "Approval notification failed; transition already committed"
            );
        }
    });
}
