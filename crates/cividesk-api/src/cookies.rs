//! Auth cookie construction.
//!
//! Both tokens travel as HttpOnly cookies scoped to the whole API. The
//! Secure flag and SameSite mode are driven by deployment configuration.

use axum_extra::extract::cookie::{Cookie, SameSite};

use cividesk_core::config::auth::AuthConfig;

/// Name of the short-lived access-token cookie.
pub const ACCESS_COOKIE: &str = "cividesk_access";
/// Name of the long-lived refresh-token cookie.
pub const REFRESH_COOKIE: &str = "cividesk_refresh";

/// Build the access-token cookie.
pub fn access_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    build(config, ACCESS_COOKIE, token, time::Duration::minutes(config.access_ttl_minutes as i64))
}

/// Build the refresh-token cookie.
pub fn refresh_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    build(config, REFRESH_COOKIE, token, time::Duration::days(config.refresh_ttl_days as i64))
}

/// Build an expired cookie that clears `name` on the client.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}

fn build(
    config: &AuthConfig,
    name: &'static str,
    token: String,
    max_age: time::Duration,
) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(config.cookie_secure);
    cookie.set_same_site(same_site(config));
    cookie.set_max_age(max_age);
    cookie
}

fn same_site(config: &AuthConfig) -> SameSite {
    match config.cookie_same_site.as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secure: bool, same_site: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            access_ttl_minutes: 60,
            refresh_ttl_days: 30,
            max_failed_attempts: 5,
            lockout_duration_minutes: 15,
            password_min_length: 8,
            argon2_memory_kib: 8,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            cookie_secure: secure,
            cookie_same_site: same_site.to_string(),
        }
    }

    #[test]
    fn test_access_cookie_attributes() {
        let cookie = access_cookie(&config(true, "strict"), "tok".to_string());
        let rendered = cookie.to_string();
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=Strict"));
        assert!(rendered.contains("Max-Age=3600"));
        assert!(rendered.starts_with("cividesk_access=tok"));
    }

    #[test]
    fn test_dev_cookie_is_not_secure() {
        let cookie = refresh_cookie(&config(false, "lax"), "tok".to_string());
        let rendered = cookie.to_string();
        assert!(rendered.contains("HttpOnly"));
        assert!(!rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=Lax"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let rendered = removal_cookie(ACCESS_COOKIE).to_string();
        assert!(rendered.contains("Max-Age=0"));
    }
}
