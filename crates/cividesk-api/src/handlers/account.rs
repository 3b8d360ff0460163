//! Account administration handlers — listing, approval, updates, deletion.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use cividesk_auth::approval::{ApprovalOutcome, notify};
use cividesk_auth::rbac::authorize_deletion;
use cividesk_core::error::AppError;
use cividesk_entity::account::{AccountRole, ApprovalStatus, UpdateAccount};

use crate::dto::request::PatchAccountRequest;
use crate::dto::response::{AccountResponse, ApiResponse, MessageResponse};
use crate::extractors::AuthAccount;
use crate::middleware::guard::require_admin;
use crate::state::AppState;

/// GET /api/accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, AppError> {
    require_admin(&auth)?;
    let accounts = state.accounts.list_all().await?;
    Ok(Json(ApiResponse::ok(
        accounts.into_iter().map(AccountResponse::from).collect(),
    )))
}

/// GET /api/accounts/pending
pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, AppError> {
    require_admin(&auth)?;
    let accounts = state.accounts.list_pending().await?;
    Ok(Json(ApiResponse::ok(
        accounts.into_iter().map(AccountResponse::from).collect(),
    )))
}

/// POST /api/accounts/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    transition(state, auth, id, ApprovalStatus::Approved).await
}

/// POST /api/accounts/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    transition(state, auth, id, ApprovalStatus::Rejected).await
}

/// Shared approve/reject transition. Idempotent: re-applying the current
/// status succeeds. The notification is fired after the transition has
/// committed and never blocks the response.
async fn transition(
    state: AppState,
    auth: AuthAccount,
    id: Uuid,
    status: ApprovalStatus,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    require_admin(&auth)?;

    let account = state
        .accounts
        .set_approval_status(id, status)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;

    let outcome = match status {
        ApprovalStatus::Approved => ApprovalOutcome::Approved,
        _ => ApprovalOutcome::Rejected,
    };
    notify::notify_detached(state.notifier.clone(), account.clone(), outcome);

    Ok(Json(ApiResponse::ok(AccountResponse::from(account))))
}

/// PATCH /api/accounts/{id}
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchAccountRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    require_admin(&auth)?;

    let role = match req.role.as_deref() {
        Some(s) => Some(s.parse::<AccountRole>()?),
        None => None,
    };

    // A password field is re-hashed, never stored raw.
    let password_hash = match req.password.as_deref() {
        Some(password) => {
            state.password_validator.validate(password)?;
            Some(state.password_hasher.hash_password(password)?)
        }
        None => None,
    };

    let account = state
        .accounts
        .update(
            id,
            &UpdateAccount {
                username: req.username,
                email: req.email,
                role,
                password_hash,
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;

    Ok(Json(ApiResponse::ok(AccountResponse::from(account))))
}

/// DELETE /api/accounts/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    require_admin(&auth)?;

    let target = state
        .accounts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;

    authorize_deletion(&auth.principal, &target)?;

    if !state.accounts.delete(id).await? {
        return Err(AppError::not_found(format!("Account {id} not found")));
    }

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Account deleted".to_string(),
    })))
}
