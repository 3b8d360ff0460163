//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use sqlx::PgPool;

use cividesk_auth::approval::{self, ApprovalNotifier};
use cividesk_auth::jwt::{AccessTokenDecoder, AccessTokenEncoder};
use cividesk_auth::lockout::LockoutGuard;
use cividesk_auth::ownership::OwnershipChecker;
use cividesk_auth::password::{PasswordHasher, PasswordValidator};
use cividesk_auth::session::{SessionManager, SessionStore};
use cividesk_core::config::AppConfig;
use cividesk_core::error::AppError;
use cividesk_database::repositories::{
    AccountRepository, OwnedRecordRepository, RefreshSessionRepository, RevokedTokenRepository,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; nothing in here mutates
/// after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Account repository.
    pub accounts: Arc<AccountRepository>,
    /// Revocation-list repository.
    pub revoked_tokens: Arc<RevokedTokenRepository>,
    /// Access-token verifier.
    pub access_decoder: Arc<AccessTokenDecoder>,
    /// Password hasher (Argon2id).
    pub password_hasher: Arc<PasswordHasher>,
    /// Password policy validator.
    pub password_validator: Arc<PasswordValidator>,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// Ownership check for single-record routes.
    pub ownership: Arc<OwnershipChecker>,
    /// Approval outcome notifier.
    pub notifier: Arc<dyn ApprovalNotifier>,
}

impl AppState {
    /// Wire the full dependency graph from configuration and a pool.
    ///
    /// The configuration must already be validated; component constructors
    /// assume a well-formed signing secret and ownership registry.
    pub fn build(config: AppConfig, pool: PgPool) -> Result<Self, AppError> {
        let accounts = Arc::new(AccountRepository::new(pool.clone()));
        let refresh_sessions = Arc::new(RefreshSessionRepository::new(pool.clone()));
        let revoked_tokens = Arc::new(RevokedTokenRepository::new(pool.clone()));
        let owned_records = Arc::new(OwnedRecordRepository::new(pool));

        let encoder = AccessTokenEncoder::new(&config.auth);
        let access_decoder = Arc::new(AccessTokenDecoder::new(&config.auth));
        let password_hasher = Arc::new(PasswordHasher::new(&config.auth));
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let lockout = LockoutGuard::new(Arc::clone(&accounts), &config.auth);
        let sessions = SessionStore::new(refresh_sessions, &config.auth);

        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&accounts),
            Arc::clone(&revoked_tokens),
            sessions,
            encoder,
            Arc::clone(&password_hasher),
            lockout,
            &config.auth,
        ));

        let ownership = Arc::new(OwnershipChecker::new(
            owned_records,
            config.ownership.clone(),
        ));

        let notifier = approval::notify::from_config(&config.approval);

        Ok(Self {
            config: Arc::new(config),
            accounts,
            revoked_tokens,
            access_decoder,
            password_hasher,
            password_validator,
            session_manager,
            ownership,
            notifier,
        })
    }
}
