//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::AccountRole;
use super::status::ApprovalStatus;

/// A registered account in the CiviDesk system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique email address, used as the login credential.
    pub email: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account role.
    pub role: AccountRole,
    /// Approval state gating login.
    pub approval_status: ApprovalStatus,
    /// Consecutive failed login attempts since the last success.
    pub failed_attempts: i32,
    /// Locked-out until this time (if a lockout is active).
    pub locked_until: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Whether a lockout window is active at `now`.
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: AccountRole,
}

/// Data for an administrator's generic field update.
///
/// `None` fields are left untouched; `password_hash` arrives pre-hashed,
/// never raw.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccount {
    /// New username.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New role.
    pub role: Option<AccountRole>,
    /// New password hash.
    pub password_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn account(locked_until: Option<DateTime<Utc>>) -> Account {
        let now = Utc::now();
        Account {
            id: Uuid::new_v4(),
            username: "ayana".to_string(),
            email: "ayana@example.org".to_string(),
            password_hash: "x".to_string(),
            role: AccountRole::Member,
            approval_status: ApprovalStatus::Approved,
            failed_attempts: 0,
            locked_until,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    #[test]
    fn test_lock_window() {
        let now = Utc::now();
        assert!(!account(None).is_locked_at(now));
        assert!(account(Some(now + Duration::minutes(5))).is_locked_at(now));
        assert!(!account(Some(now - Duration::minutes(5))).is_locked_at(now));
    }
}
