//! Refresh session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A long-lived opaque refresh session, store-backed and used solely to
/// mint new access tokens.
///
/// Created at login, deleted at logout or when presented after expiry.
/// The row is never rotated by a refresh.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshSession {
    /// Opaque, unguessable token value.
    #[serde(skip_serializing)]
    pub token: String,
    /// Owning account.
    pub account_id: Uuid,
    /// When the session was issued.
    pub issued_at: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
    /// Device descriptor (User-Agent hint), if known.
    pub device: Option<String>,
}

impl RefreshSession {
    /// Whether the session has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
