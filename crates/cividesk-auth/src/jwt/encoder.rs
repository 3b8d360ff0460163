//! Access-token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use cividesk_core::config::auth::AuthConfig;
use cividesk_core::error::AppError;
use cividesk_entity::account::Account;

use super::claims::Claims;

/// Creates signed access tokens.
///
/// The signing secret is validated at startup; a malformed secret is a
/// fatal configuration error, never a per-request one.
#[derive(Clone)]
pub struct AccessTokenEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
}

impl std::fmt::Debug for AccessTokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

impl AccessTokenEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
        }
    }

    /// Issues an access token for the given account.
    pub fn issue(&self, account: &Account) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::minutes(self.access_ttl_minutes);

        let claims = Claims {
            sub: account.id,
            email: account.email.clone(),
            role: account.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, expires_at))
    }
}
