//! Revoked access-token repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cividesk_core::error::{AppError, ErrorKind};
use cividesk_core::result::AppResult;

/// Repository for the persisted revocation list.
#[derive(Debug, Clone)]
pub struct RevokedTokenRepository {
    pool: PgPool,
}

impl RevokedTokenRepository {
    /// Create a new revoked-token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a token into the revocation list. Idempotent: revoking an
    /// already-revoked token is a no-op.
    pub async fn revoke(&self, token: &str) -> AppResult<()> {
        sqlx::query("INSERT INTO revoked_tokens (token) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to revoke token", e)
            })?;
        Ok(())
    }

    /// Whether a token is on the revocation list.
    pub async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token = $1)")
            .bind(token)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check revocation list", e)
            })
    }

    /// Delete revocation rows older than `cutoff`.
    ///
    /// A token revoked before `now - access_ttl` can no longer pass expiry
    /// verification, so its row is dead weight. Returns the number of rows
    /// removed.
    pub async fn prune_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE revoked_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to prune revocation list", e)
            })?;
        Ok(result.rows_affected())
    }
}
