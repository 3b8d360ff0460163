//! Claims payload embedded in every access token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cividesk_entity::account::AccountRole;

use crate::principal::Principal;

/// Access-token claims.
///
/// Carries everything a protected route needs to build a [`Principal`], so
/// baseline validity never requires a store lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the account id.
    pub sub: Uuid,
    /// Account email at issuance time.
    pub email: String,
    /// Account role at issuance time.
    pub role: AccountRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Build the request principal from these claims.
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.sub,
            email: self.email.clone(),
            role: self.role,
        }
    }
}
