//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the access-control system.
///
/// Verb permissions per role live in the decision table in
/// `cividesk-auth::rbac`; this enum only names the roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Default role for self-registered accounts; read-only access.
    Member,
    /// Program staff; full record editing short of deletion.
    Staff,
    /// Finance team; read plus ledger submission.
    Finance,
    /// Administrator; all verbs, account management.
    Admin,
    /// Unrestricted administrator.
    SuperAdmin,
}

impl AccountRole {
    /// Whether this role carries blanket administrative privileges.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Whether this role bypasses the ownership check on single-record
    /// routes.
    pub fn bypasses_ownership(&self) -> bool {
        matches!(self, Self::Staff | Self::Admin | Self::SuperAdmin)
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Staff => "staff",
            Self::Finance => "finance",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = cividesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "staff" => Ok(Self::Staff),
            "finance" => Ok(Self::Finance),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(cividesk_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: member, staff, finance, admin, super_admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("member".parse::<AccountRole>().unwrap(), AccountRole::Member);
        assert_eq!(
            "SUPER_ADMIN".parse::<AccountRole>().unwrap(),
            AccountRole::SuperAdmin
        );
        assert!("root".parse::<AccountRole>().is_err());
    }

    #[test]
    fn test_admin_classification() {
        assert!(AccountRole::Admin.is_admin());
        assert!(AccountRole::SuperAdmin.is_admin());
        assert!(!AccountRole::Staff.is_admin());
        assert!(!AccountRole::Finance.is_admin());
    }

    #[test]
    fn test_ownership_bypass_set() {
        assert!(AccountRole::Staff.bypasses_ownership());
        assert!(AccountRole::Admin.bypasses_ownership());
        assert!(AccountRole::SuperAdmin.bypasses_ownership());
        assert!(!AccountRole::Member.bypasses_ownership());
        assert!(!AccountRole::Finance.bypasses_ownership());
    }
}
