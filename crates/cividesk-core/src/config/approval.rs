//! Approval notification configuration.

use serde::{Deserialize, Serialize};

/// Best-effort approval/rejection notification settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalConfig {
    /// Webhook URL receiving approval outcome notifications.
    /// Empty disables the webhook; outcomes are then only logged.
    #[serde(default)]
    pub webhook_url: String,
}
