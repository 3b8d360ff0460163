//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password; strength-checked, then hashed.
    pub password: String,
    /// Requested role; defaults to member. Super admin is not
    /// self-assignable.
    pub role: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Administrator's generic account update (PATCH).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchAccountRequest {
    /// New username.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New role.
    pub role: Option<String>,
    /// New plaintext password; re-hashed, never stored raw.
    pub password: Option<String>,
}
