//! Authentication, lockout, and cookie configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Minimum accepted signing-secret length in bytes.
const MIN_SECRET_LEN: usize = 32;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access-token signing (HMAC-SHA256).
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh session TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Consecutive failed login attempts before lockout.
    #[serde(default = "default_max_failed")]
    pub max_failed_attempts: i32,
    /// Account lockout duration in minutes.
    #[serde(default = "default_lockout")]
    pub lockout_duration_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2id memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2id iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2id lane count.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
    /// Whether auth cookies carry the Secure flag.
    #[serde(default)]
    pub cookie_secure: bool,
    /// SameSite mode for auth cookies: `"strict"`, `"lax"`, or `"none"`.
    #[serde(default = "default_same_site")]
    pub cookie_same_site: String,
}

impl AuthConfig {
    /// Validate signing and lockout parameters at startup.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        if self.max_failed_attempts < 1 {
            return Err(AppError::configuration(
                "auth.max_failed_attempts must be at least 1",
            ));
        }
        match self.cookie_same_site.as_str() {
            "strict" | "lax" | "none" => {}
            other => {
                return Err(AppError::configuration(format!(
                    "auth.cookie_same_site must be strict, lax, or none (got '{other}')"
                )));
            }
        }
        Ok(())
    }
}

fn default_access_ttl() -> u64 {
    60
}

fn default_refresh_ttl() -> u64 {
    30
}

fn default_max_failed() -> i32 {
    5
}

fn default_lockout() -> u64 {
    15
}

fn default_password_min() -> usize {
    8
}

fn default_argon2_memory() -> u32 {
    19456
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}

fn default_same_site() -> String {
    "lax".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            max_failed_attempts: default_max_failed(),
            lockout_duration_minutes: default_lockout(),
            password_min_length: default_password_min(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            cookie_secure: false,
            cookie_same_site: default_same_site(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_short_secret_is_fatal() {
        let mut config = base_config();
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_same_site_rejected() {
        let mut config = base_config();
        config.cookie_same_site = "sideways".to_string();
        assert!(config.validate().is_err());
    }
}
