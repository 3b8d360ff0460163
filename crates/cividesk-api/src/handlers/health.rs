//! Health check handler.

use axum::Json;

use crate::dto::response::{ApiResponse, MessageResponse};

/// GET /api/health — liveness probe, no auth required.
pub async fn health_check() -> Json<ApiResponse<MessageResponse>> {
    Json(ApiResponse::ok(MessageResponse {
        message: "ok".to_string(),
    }))
}
