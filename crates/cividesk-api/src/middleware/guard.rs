//! Guard helpers called at the top of protected handlers.
//!
//! This is the contract record collaborators consume: every generic
//! protected route evaluates [`require_verb`] against the caller's role,
//! and single-record routes declared ownership-scoped call
//! [`ensure_record_access`] instead of (or in addition to) the matrix.

use cividesk_auth::rbac::{self, Verb};
use cividesk_core::error::AppError;

use crate::extractors::AuthAccount;
use crate::state::AppState;

/// Requires an admin or super-admin caller.
pub fn require_admin(auth: &AuthAccount) -> Result<(), AppError> {
    if auth.role.is_admin() {
        Ok(())
    } else {
        Err(AppError::authorization("Administrator access required"))
    }
}

/// Evaluates the role × verb decision table for the caller.
pub fn require_verb(auth: &AuthAccount, verb: Verb) -> Result<(), AppError> {
    rbac::authorize(auth.role, verb)
}

/// Runs the ownership check for one record of a registered entity.
///
/// Admin/staff/super-admin callers pass unconditionally; everyone else
/// must match the record's owner column. An unknown record id surfaces as
/// not-found, not as a denial.
pub async fn ensure_record_access(
    state: &AppState,
    auth: &AuthAccount,
    entity: &str,
    record_id: &str,
) -> Result<(), AppError> {
    state.ownership.check(&auth.principal, entity, record_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use cividesk_auth::principal::Principal;
    use cividesk_entity::account::AccountRole;
    use uuid::Uuid;

    fn auth(role: AccountRole) -> AuthAccount {
        AuthAccount {
            principal: Principal {
                id: Uuid::new_v4(),
                email: "caller@example.org".to_string(),
                role,
            },
            token: "tok".to_string(),
        }
    }

    #[test]
    fn test_admin_guard() {
        assert!(require_admin(&auth(AccountRole::Admin)).is_ok());
        assert!(require_admin(&auth(AccountRole::SuperAdmin)).is_ok());
        assert!(require_admin(&auth(AccountRole::Staff)).is_err());
        assert!(require_admin(&auth(AccountRole::Member)).is_err());
    }

    #[test]
    fn test_verb_guard_follows_matrix() {
        assert!(require_verb(&auth(AccountRole::Member), Verb::Get).is_ok());
        assert!(require_verb(&auth(AccountRole::Member), Verb::Post).is_err());
        assert!(require_verb(&auth(AccountRole::Finance), Verb::Post).is_ok());
        assert!(require_verb(&auth(AccountRole::SuperAdmin), Verb::Delete).is_ok());
    }
}
