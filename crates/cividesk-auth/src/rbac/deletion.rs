//! Account-deletion authorization rules.

use cividesk_core::error::AppError;
use cividesk_entity::account::{Account, AccountRole};

use crate::principal::Principal;

/// Decides whether `requester` may delete `target`.
///
/// Rules, in order: no self-deletion; super-admin accounts are never
/// deletable; an admin (as opposed to a super admin) may only delete
/// member accounts. Callers must already have passed the admin guard.
pub fn authorize_deletion(requester: &Principal, target: &Account) -> Result<(), AppError> {
    if requester.id == target.id {
        return Err(AppError::authorization("You cannot delete your own account"));
    }
    if target.role == AccountRole::SuperAdmin {
        return Err(AppError::authorization(
            "Super admin accounts cannot be deleted",
        ));
    }
    if requester.role == AccountRole::Admin && target.role != AccountRole::Member {
        return Err(AppError::authorization(
            "Admins may only delete member accounts",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cividesk_entity::account::ApprovalStatus;
    use uuid::Uuid;

    fn principal(role: AccountRole) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            email: "admin@example.org".to_string(),
            role,
        }
    }

    fn target(role: AccountRole) -> Account {
        let now = Utc::now();
        Account {
            id: Uuid::new_v4(),
            username: "target".to_string(),
            email: "target@example.org".to_string(),
            password_hash: "x".to_string(),
            role,
            approval_status: ApprovalStatus::Approved,
            failed_attempts: 0,
            locked_until: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    #[test]
    fn test_self_deletion_refused_for_every_role() {
        for role in [
            AccountRole::Admin,
            AccountRole::SuperAdmin,
        ] {
            let requester = principal(role);
            let mut own = target(role);
            own.id = requester.id;
            assert!(authorize_deletion(&requester, &own).is_err());
        }
    }

    #[test]
    fn test_super_admin_target_is_untouchable() {
        assert!(authorize_deletion(&principal(AccountRole::Admin), &target(AccountRole::SuperAdmin)).is_err());
        assert!(
            authorize_deletion(
                &principal(AccountRole::SuperAdmin),
                &target(AccountRole::SuperAdmin)
            )
            .is_err()
        );
    }

    #[test]
    fn test_admin_scope_is_members_only() {
        let admin = principal(AccountRole::Admin);
        assert!(authorize_deletion(&admin, &target(AccountRole::Member)).is_ok());
        assert!(authorize_deletion(&admin, &target(AccountRole::Staff)).is_err());
        assert!(authorize_deletion(&admin, &target(AccountRole::Finance)).is_err());
        assert!(authorize_deletion(&admin, &target(AccountRole::Admin)).is_err());
    }

    #[test]
    fn test_super_admin_deletes_any_non_super_admin() {
        let root = principal(AccountRole::SuperAdmin);
        for role in [
            AccountRole::Member,
            AccountRole::Staff,
            AccountRole::Finance,
            AccountRole::Admin,
        ] {
            assert!(authorize_deletion(&root, &target(role)).is_ok());
        }
    }
}
