//! Refresh session repository implementation.

use sqlx::PgPool;

use cividesk_core::error::{AppError, ErrorKind};
use cividesk_core::result::AppResult;
use cividesk_entity::session::RefreshSession;

/// Repository for refresh-session rows.
#[derive(Debug, Clone)]
pub struct RefreshSessionRepository {
    pool: PgPool,
}

impl RefreshSessionRepository {
    /// Create a new refresh-session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a newly issued session.
    pub async fn create(&self, session: &RefreshSession) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO refresh_sessions (token, account_id, issued_at, expires_at, device) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&session.token)
        .bind(session.account_id)
        .bind(session.issued_at)
        .bind(session.expires_at)
        .bind(&session.device)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create refresh session", e)
        })?;
        Ok(())
    }

    /// Find a session by its opaque token value.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshSession>> {
        sqlx::query_as::<_, RefreshSession>("SELECT * FROM refresh_sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find refresh session", e)
            })
    }

    /// Delete the session matching a token. Returns `false` when no row
    /// matched.
    pub async fn delete_by_token(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM refresh_sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete refresh session", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
