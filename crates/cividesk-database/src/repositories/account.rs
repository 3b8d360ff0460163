//! Account repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use cividesk_core::error::{AppError, ErrorKind};
use cividesk_core::result::AppResult;
use cividesk_entity::account::{Account, ApprovalStatus, CreateAccount, UpdateAccount};

/// Repository for account CRUD and the login-counter operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })
    }

    /// Find an account by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
            })
    }

    /// List all accounts, newest first.
    pub async fn list_all(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))
    }

    /// List accounts awaiting approval, oldest first.
    pub async fn list_pending(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE approval_status = 'pending' ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending accounts", e)
        })
    }

    /// Create a new account. Approval status starts as `pending` via the
    /// column default.
    pub async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (username, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &data.username))
    }

    /// Set the approval status. Idempotent: re-applying the current status
    /// succeeds and returns the unchanged row.
    pub async fn set_approval_status(
        &self,
        id: Uuid,
        status: ApprovalStatus,
    ) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET approval_status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update approval status", e)
        })
    }

    /// Apply an administrator's partial field update.
    pub async fn update(&self, id: Uuid, data: &UpdateAccount) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET username = COALESCE($2, username), \
                                 email = COALESCE($3, email), \
                                 role = COALESCE($4, role), \
                                 password_hash = COALESCE($5, password_hash), \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.username)
        .bind(&data.email)
        .bind(data.role)
        .bind(&data.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, data.username.as_deref().unwrap_or("")))
    }

    /// Delete an account. Returns `false` when no row matched.
    ///
    /// A foreign-key violation from dependent records maps to an integrity
    /// error, not a database error.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    AppError::integrity("Account has dependent records and cannot be deleted")
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to delete account", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Record a failed login attempt and decide the lockout in one atomic
    /// statement.
    ///
    /// The increment and the threshold comparison happen inside a single
    /// conditional UPDATE so concurrent failures cannot lose increments or
    /// misplace the lockout boundary. Returns the new counter value and the
    /// lockout deadline, if one is now active.
    pub async fn record_failed_attempt(
        &self,
        id: Uuid,
        threshold: i32,
        lockout_minutes: i32,
    ) -> AppResult<(i32, Option<DateTime<Utc>>)> {
        sqlx::query_as::<_, (i32, Option<DateTime<Utc>>)>(
            "UPDATE accounts \
             SET failed_attempts = failed_attempts + 1, \
                 locked_until = CASE \
                     WHEN failed_attempts + 1 >= $2 \
                     THEN NOW() + make_interval(mins => $3) \
                     ELSE locked_until \
                 END, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING failed_attempts, locked_until",
        )
        .bind(id)
        .bind(threshold)
        .bind(lockout_minutes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record failed attempt", e)
        })
    }

    /// Reset the failure counter, clear any lockout, and stamp the login
    /// time. Called exactly on successful authentication.
    pub async fn record_successful_login(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE accounts SET failed_attempts = 0, locked_until = NULL, \
                                 last_login_at = NOW(), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to reset failed attempts", e)
        })?;
        Ok(())
    }
}

/// Map unique-constraint violations to conflict errors with a friendly
/// message; everything else stays a database error.
fn map_unique_violation(e: sqlx::Error, username: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            match db_err.constraint() {
                Some("accounts_username_key") => {
                    AppError::conflict(format!("Username '{username}' already exists"))
                }
                Some("accounts_email_key") => AppError::conflict("Email already in use"),
                _ => AppError::conflict("Account already exists"),
            }
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to write account", e),
    }
}
