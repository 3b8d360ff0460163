//! Auth handlers — register, login, refresh, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use cividesk_core::error::AppError;
use cividesk_entity::account::{AccountRole, CreateAccount};

use crate::cookies::{self, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{AccountResponse, ApiResponse, LoginResponse, MessageResponse};
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// POST /api/auth/register
///
/// New accounts always start pending; an administrator must approve them
/// before the first login can succeed.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let role = match req.role.as_deref() {
        None | Some("") => AccountRole::Member,
        Some(s) => {
            let role: AccountRole = s.parse()?;
            if role == AccountRole::SuperAdmin {
                return Err(AppError::validation(
                    "The super_admin role cannot be self-assigned",
                ));
            }
            role
        }
    };

    state.password_validator.validate(&req.password)?;
    let password_hash = state.password_hasher.hash_password(&req.password)?;

    let account = state
        .accounts
        .create(&CreateAccount {
            username: req.username,
            email: req.email,
            password_hash,
            role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AccountResponse::from(account))),
    ))
}

/// POST /api/auth/login
///
/// On success both tokens are delivered as scoped cookies.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let device = headers.get("user-agent").and_then(|v| v.to_str().ok());

    let result = state
        .session_manager
        .login(&req.email, &req.password, device)
        .await?;

    let auth_config = &state.config.auth;
    let jar = jar
        .add(cookies::access_cookie(auth_config, result.access_token))
        .add(cookies::refresh_cookie(
            auth_config,
            result.refresh_session.token.clone(),
        ));

    Ok((
        jar,
        Json(ApiResponse::ok(LoginResponse {
            account: AccountResponse::from(result.account),
            access_expires_at: result.access_expires_at,
        })),
    ))
}

/// POST /api/auth/refresh
///
/// Reads the refresh cookie and reissues the access cookie. The refresh
/// session row is left untouched.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), AppError> {
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::validation("Missing refresh cookie"))?;

    let (access_token, _expires_at) = state.session_manager.refresh(&refresh_token).await?;

    let jar = jar.add(cookies::access_cookie(&state.config.auth, access_token));

    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Access token refreshed".to_string(),
        })),
    ))
}

/// POST /api/auth/logout
///
/// Revokes the presented access token, deletes the matching refresh
/// session, and clears both cookies.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthAccount,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), AppError> {
    let refresh_token = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());

    state
        .session_manager
        .logout(&auth.token, refresh_token.as_deref())
        .await?;

    let jar = jar
        .add(cookies::removal_cookie(ACCESS_COOKIE))
        .add(cookies::removal_cookie(REFRESH_COOKIE));

    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out successfully".to_string(),
        })),
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    let account = state
        .accounts
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| AppError::not_found("Account not found"))?;

    Ok(Json(ApiResponse::ok(AccountResponse::from(account))))
}
