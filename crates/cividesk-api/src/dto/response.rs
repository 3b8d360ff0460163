//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cividesk_entity::account::Account;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Account summary for responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: String,
    /// Approval status.
    pub approval_status: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Last successful login.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            role: account.role.to_string(),
            approval_status: account.approval_status.to_string(),
            created_at: account.created_at,
            last_login_at: account.last_login_at,
        }
    }
}

/// Login response body; the tokens themselves travel as cookies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The authenticated account.
    pub account: AccountResponse,
    /// Access token expiry, for client-side refresh scheduling.
    pub access_expires_at: DateTime<Utc>,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}
