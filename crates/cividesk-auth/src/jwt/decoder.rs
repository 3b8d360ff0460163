//! Access-token verification.
//!
//! Verification here is purely cryptographic (signature + expiry). The
//! revocation-list membership check happens in the HTTP extractor, before
//! this decoder runs, so a revoked-but-valid token never reaches a route.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use cividesk_core::config::auth::AuthConfig;
use cividesk_core::error::AppError;

use super::claims::Claims;

/// Validates access tokens by signature and expiry alone.
#[derive(Clone)]
pub struct AccessTokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for AccessTokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AccessTokenDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and verifies an access token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::AccessTokenEncoder;
    use chrono::Utc;
    use cividesk_entity::account::{Account, AccountRole, ApprovalStatus};
    use uuid::Uuid;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            access_ttl_minutes: 60,
            refresh_ttl_days: 30,
            max_failed_attempts: 5,
            lockout_duration_minutes: 15,
            password_min_length: 8,
            argon2_memory_kib: 8,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            cookie_secure: false,
            cookie_same_site: "lax".to_string(),
        }
    }

    fn account() -> Account {
        let now = Utc::now();
        Account {
            id: Uuid::new_v4(),
            username: "samira".to_string(),
            email: "samira@example.org".to_string(),
            password_hash: "x".to_string(),
            role: AccountRole::Staff,
            approval_status: ApprovalStatus::Approved,
            failed_attempts: 0,
            locked_until: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_round_trip() {
        let cfg = config(SECRET);
        let account = account();
        let (token, expires_at) = AccessTokenEncoder::new(&cfg).issue(&account).unwrap();

        let claims = AccessTokenDecoder::new(&cfg).decode(&token).unwrap();
        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.email, account.email);
        assert_eq!(claims.role, AccountRole::Staff);
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (token, _) = AccessTokenEncoder::new(&config(SECRET))
            .issue(&account())
            .unwrap();

        let other = config("ffffffffffffffffffffffffffffffff");
        assert!(AccessTokenDecoder::new(&other).decode(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let decoder = AccessTokenDecoder::new(&config(SECRET));
        assert!(decoder.decode("not-a-token").is_err());
        assert!(decoder.decode("").is_err());
    }

    #[test]
    fn test_expired_rejected() {
        // Sign claims whose exp is well past the decoder's leeway.
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "old@example.org".to_string(),
            role: AccountRole::Member,
            iat: (now - chrono::Duration::minutes(20)).timestamp(),
            exp: (now - chrono::Duration::minutes(10)).timestamp(),
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = AccessTokenDecoder::new(&config(SECRET))
            .decode(&token)
            .unwrap_err();
        assert_eq!(err.message, "Token has expired");
    }
}
