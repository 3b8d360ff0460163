//! Owner-column check for single-record routes.

use std::sync::Arc;

use cividesk_core::config::ownership::OwnershipConfig;
use cividesk_core::error::AppError;
use cividesk_database::repositories::OwnedRecordRepository;

use crate::principal::Principal;

/// Grants a non-privileged caller access to the specific records they own.
///
/// Privileged roles (staff, admin, super admin) are granted
/// unconditionally; everyone else must match the record's configured owner
/// column by email or account id.
#[derive(Debug, Clone)]
pub struct OwnershipChecker {
    records: Arc<OwnedRecordRepository>,
    registry: OwnershipConfig,
}

impl OwnershipChecker {
    /// Creates a checker over the startup-validated registry.
    pub fn new(records: Arc<OwnedRecordRepository>, registry: OwnershipConfig) -> Self {
        Self { records, registry }
    }

    /// Checks access to one record of the named entity.
    ///
    /// A record id with no matching row is a not-found outcome, distinct
    /// from a denial.
    pub async fn check(
        &self,
        principal: &Principal,
        entity: &str,
        record_id: &str,
    ) -> Result<(), AppError> {
        if principal.role.bypasses_ownership() {
            return Ok(());
        }

        let mapping = self.registry.get(entity).ok_or_else(|| {
            AppError::configuration(format!("No ownership mapping for entity '{entity}'"))
        })?;

        let owner = self
            .records
            .fetch_owner(mapping, record_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{entity} '{record_id}' not found")))?;

        match owner {
            Some(owner) if owner_matches(&owner, principal) => Ok(()),
            _ => Err(AppError::authorization(
                "You do not have access to this record",
            )),
        }
    }
}

/// String-normalized comparison of the owner column against the caller's
/// email or account id.
fn owner_matches(owner: &str, principal: &Principal) -> bool {
    let owner = owner.trim();
    owner.eq_ignore_ascii_case(principal.email.trim())
        || owner.eq_ignore_ascii_case(&principal.id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cividesk_entity::account::AccountRole;
    use uuid::Uuid;

    fn principal() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            email: "Dawit@Example.org".to_string(),
            role: AccountRole::Member,
        }
    }

    #[test]
    fn test_email_match_is_case_insensitive() {
        let p = principal();
        assert!(owner_matches("dawit@example.org", &p));
        assert!(owner_matches(" dawit@example.org ", &p));
        assert!(!owner_matches("other@example.org", &p));
    }

    #[test]
    fn test_account_id_match() {
        let p = principal();
        assert!(owner_matches(&p.id.to_string(), &p));
        assert!(owner_matches(&p.id.to_string().to_uppercase(), &p));
        assert!(!owner_matches(&Uuid::new_v4().to_string(), &p));
    }
}
