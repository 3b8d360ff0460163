//! Session lifecycle manager — login, refresh, and logout flows.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use cividesk_core::config::auth::AuthConfig;
use cividesk_core::error::AppError;
use cividesk_database::repositories::{AccountRepository, RevokedTokenRepository};
use cividesk_entity::account::Account;
use cividesk_entity::session::RefreshSession;

use crate::approval::ApprovalGate;
use crate::jwt::AccessTokenEncoder;
use crate::lockout::{LockoutGuard, LockoutStatus};
use crate::password::PasswordHasher;

use super::store::SessionStore;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated account.
    pub account: Account,
    /// Signed access token.
    pub access_token: String,
    /// Access token expiry.
    pub access_expires_at: DateTime<Utc>,
    /// The newly created refresh session.
    pub refresh_session: RefreshSession,
}

/// Drives the dual-token session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    accounts: Arc<AccountRepository>,
    revoked: Arc<RevokedTokenRepository>,
    sessions: SessionStore,
    encoder: AccessTokenEncoder,
    hasher: Arc<PasswordHasher>,
    gate: ApprovalGate,
    lockout: LockoutGuard,
    access_ttl_minutes: i64,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager with its collaborators.
    pub fn new(
        accounts: Arc<AccountRepository>,
        revoked: Arc<RevokedTokenRepository>,
        sessions: SessionStore,
        encoder: AccessTokenEncoder,
        hasher: Arc<PasswordHasher>,
        lockout: LockoutGuard,
        config: &AuthConfig,
    ) -> Self {
        Self {
            accounts,
            revoked,
            sessions,
            encoder,
            hasher,
            gate: ApprovalGate::new(),
            lockout,
            access_ttl_minutes: config.access_ttl_minutes as i64,
        }
    }

    /// Performs the complete login flow.
    ///
    /// Gate order is a contract: approval gate, then lockout check, and
    /// only then credential comparison. A correct password never rescues a
    /// non-approved or locked account.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        device: Option<&str>,
    ) -> Result<LoginResult, AppError> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        self.gate.check(&account)?;

        if let LockoutStatus::Locked { remaining_minutes } = self.lockout.check(&account) {
            return Err(AppError::authorization(format!(
                "Account is locked. Try again in {remaining_minutes} minute(s)"
            )));
        }

        let password_valid = self
            .hasher
            .verify_password(password, &account.password_hash)?;

        if !password_valid {
            self.lockout.record_failure(&account).await?;
            return Err(AppError::authentication("Invalid email or password"));
        }

        self.lockout.record_success(&account).await?;

        let (access_token, access_expires_at) = self.encoder.issue(&account)?;
        let refresh_session = self.sessions.issue(account.id, device).await?;

        info!(account_id = %account.id, "Login successful");

        Ok(LoginResult {
            account,
            access_token,
            access_expires_at,
            refresh_session,
        })
    }

    /// Mints a new access token from a presented refresh token.
    ///
    /// The refresh session row is left untouched; it is not rotated and
    /// keeps its original expiry.
    pub async fn refresh(
        &self,
        refresh_token: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let session = self
            .sessions
            .find_live(refresh_token)
            .await?
            .ok_or_else(|| AppError::authentication("Unknown or expired refresh session"))?;

        // Re-read the account: role changes and approval revocations take
        // effect at the next refresh.
        let account = self
            .accounts
            .find_by_id(session.account_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;

        self.gate.check(&account)?;

        let issued = self.encoder.issue(&account)?;
        info!(account_id = %account.id, "Access token refreshed");
        Ok(issued)
    }

    /// Performs the logout flow.
    ///
    /// Revokes exactly the presented access token (idempotently) and
    /// deletes exactly the refresh session matching the presented refresh
    /// token. Also prunes revocation rows old enough that their token has
    /// expired on its own.
    pub async fn logout(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<(), AppError> {
        self.revoked.revoke(access_token).await?;

        let cutoff = Utc::now() - Duration::minutes(self.access_ttl_minutes);
        let pruned = self.revoked.prune_older_than(cutoff).await?;
        if pruned > 0 {
            info!(pruned, "Pruned stale revocation rows");
        }

        if let Some(token) = refresh_token {
            let _ = self.sessions.delete(token).await?;
        }

        Ok(())
    }
}
