//! `AuthAccount` extractor — the AuthMiddleware composition.
//!
//! Order, each step short-circuiting: (a) pull the token from the
//! Authorization bearer header, falling back to the access cookie;
//! (b) revocation-list membership; (c) signature and expiry verification;
//! (d) attach the principal. The revocation check deliberately runs before
//! cryptographic verification so a revoked-but-valid token is rejected on
//! list membership alone.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use cividesk_auth::principal::Principal;
use cividesk_core::error::AppError;

use crate::cookies::ACCESS_COOKIE;
use crate::state::AppState;

/// Verified caller identity available to handlers, plus the raw token so
/// logout can revoke exactly what was presented.
#[derive(Debug, Clone)]
pub struct AuthAccount {
    /// The verified principal.
    pub principal: Principal,
    /// The raw access token as presented.
    pub token: String,
}

impl std::ops::Deref for AuthAccount {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.principal
    }
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(|| AppError::authentication("Missing access token"))?;

        if state.revoked_tokens.is_revoked(&token).await? {
            return Err(AppError::authentication("Token has been revoked"));
        }

        let claims = state.access_decoder.decode(&token)?;

        Ok(AuthAccount {
            principal: claims.principal(),
            token,
        })
    }
}

/// Token from an `Authorization: Bearer ...` header.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}

/// Token from the HttpOnly access cookie.
fn cookie_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
}
