//! Refresh-session issuance and lookup over the database repository.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use uuid::Uuid;

use cividesk_core::config::auth::AuthConfig;
use cividesk_core::error::AppError;
use cividesk_database::repositories::RefreshSessionRepository;
use cividesk_entity::session::RefreshSession;

/// Number of random bytes in an opaque refresh token.
const TOKEN_BYTES: usize = 32;

/// Issues and resolves opaque refresh sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    repo: Arc<RefreshSessionRepository>,
    refresh_ttl_days: i64,
}

impl SessionStore {
    /// Creates a session store from auth configuration.
    pub fn new(repo: Arc<RefreshSessionRepository>, config: &AuthConfig) -> Self {
        Self {
            repo,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Issues and persists a new refresh session for an account.
    pub async fn issue(
        &self,
        account_id: Uuid,
        device: Option<&str>,
    ) -> Result<RefreshSession, AppError> {
        let now = Utc::now();
        let session = RefreshSession {
            token: generate_token(),
            account_id,
            issued_at: now,
            expires_at: now + Duration::days(self.refresh_ttl_days),
            device: device.map(String::from),
        };

        self.repo.create(&session).await?;
        Ok(session)
    }

    /// Resolves a presented refresh token to its live session.
    ///
    /// An expired row is deleted on presentation and treated as absent;
    /// expired rows are otherwise left in place rather than swept.
    pub async fn find_live(&self, token: &str) -> Result<Option<RefreshSession>, AppError> {
        let Some(session) = self.repo.find_by_token(token).await? else {
            return Ok(None);
        };

        if session.is_expired_at(Utc::now()) {
            let _ = self.repo.delete_by_token(token).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Deletes the session matching a token. Returns `false` when no row
    /// matched.
    pub async fn delete(&self, token: &str) -> Result<bool, AppError> {
        self.repo.delete_by_token(token).await
    }
}

/// Generates a cryptographically random, URL-safe opaque token.
fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_shape() {
        let token = generate_token();
        // 32 bytes → 43 base64url chars, no padding.
        assert_eq!(token.len(), 43);
        assert!(!token.contains('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }

    #[test]
    fn test_tokens_are_unique() {
        let tokens: HashSet<String> = (0..100).map(|_| generate_token()).collect();
        assert_eq!(tokens.len(), 100);
    }
}
