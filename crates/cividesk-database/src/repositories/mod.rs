//! Repository implementations over the PostgreSQL store.

pub mod account;
pub mod owned_record;
pub mod refresh_session;
pub mod revoked_token;

pub use account::AccountRepository;
pub use owned_record::OwnedRecordRepository;
pub use refresh_session::RefreshSessionRepository;
pub use revoked_token::RevokedTokenRepository;
