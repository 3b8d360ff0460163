//! Account approval status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Approval state gating whether an account may authenticate.
///
/// `Pending` transitions exactly once to `Approved` or `Rejected` by an
/// administrator action; both are terminal for login eligibility unless an
/// explicit (idempotent) re-approval occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "approval_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Registered, awaiting administrator review.
    Pending,
    /// Cleared for login.
    Approved,
    /// Refused by an administrator.
    Rejected,
}

impl ApprovalStatus {
    /// Whether an account in this state may authenticate.
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = cividesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(cividesk_core::AppError::validation(format!(
                "Invalid approval status: '{s}'. Expected one of: pending, approved, rejected"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_approved_can_login() {
        assert!(ApprovalStatus::Approved.can_login());
        assert!(!ApprovalStatus::Pending.can_login());
        assert!(!ApprovalStatus::Rejected.can_login());
    }
}
