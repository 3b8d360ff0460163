//! The role × verb decision table.
//!
//! This is the single authorization mechanism for generic protected
//! routes. Earlier designs carried both a role allowlist with a
//! super-admin bypass and a separate verb matrix; those are unified here
//! into one table whose super-admin entry is an explicit wildcard.
//! Unknown roles never reach this table — they fail at deserialization —
//! so denial-by-default is unrepresentable rather than implicit.

use std::fmt;

use cividesk_core::error::AppError;
use cividesk_entity::account::AccountRole;

/// HTTP verbs governed by the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    /// Map an HTTP method name; `None` for methods outside the table
    /// (HEAD, OPTIONS, ...), which are always denied for protected routes.
    pub fn from_method(method: &str) -> Option<Self> {
        match method {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        };
        write!(f, "{s}")
    }
}

/// A role's entry in the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbSet {
    /// Wildcard: every verb, present and future.
    All,
    /// Exactly these verbs.
    Only(&'static [Verb]),
}

impl VerbSet {
    /// Whether the set contains a verb.
    pub fn allows(&self, verb: Verb) -> bool {
        match self {
            Self::All => true,
            Self::Only(verbs) => verbs.contains(&verb),
        }
    }
}

/// The decision table itself.
pub fn verbs_for(role: AccountRole) -> VerbSet {
    match role {
        AccountRole::Member => VerbSet::Only(&[Verb::Get]),
        AccountRole::Staff => VerbSet::Only(&[Verb::Get, Verb::Post, Verb::Put, Verb::Patch]),
        AccountRole::Finance => VerbSet::Only(&[Verb::Get, Verb::Post]),
        AccountRole::Admin => VerbSet::All,
        // Explicit wildcard entry; the only bypass in the system.
        AccountRole::SuperAdmin => VerbSet::All,
    }
}

/// Evaluates the table for a role and verb.
pub fn authorize(role: AccountRole, verb: Verb) -> Result<(), AppError> {
    if verbs_for(role).allows(verb) {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "Role '{role}' is not allowed to {verb}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_is_read_only() {
        assert!(authorize(AccountRole::Member, Verb::Get).is_ok());
        for verb in [Verb::Post, Verb::Put, Verb::Patch, Verb::Delete] {
            assert!(authorize(AccountRole::Member, verb).is_err());
        }
    }

    #[test]
    fn test_staff_edits_but_never_deletes() {
        for verb in [Verb::Get, Verb::Post, Verb::Put, Verb::Patch] {
            assert!(authorize(AccountRole::Staff, verb).is_ok());
        }
        assert!(authorize(AccountRole::Staff, Verb::Delete).is_err());
    }

    #[test]
    fn test_finance_reads_and_submits() {
        assert!(authorize(AccountRole::Finance, Verb::Get).is_ok());
        assert!(authorize(AccountRole::Finance, Verb::Post).is_ok());
        assert!(authorize(AccountRole::Finance, Verb::Put).is_err());
        assert!(authorize(AccountRole::Finance, Verb::Patch).is_err());
        assert!(authorize(AccountRole::Finance, Verb::Delete).is_err());
    }

    #[test]
    fn test_admin_roles_are_wildcards() {
        for role in [AccountRole::Admin, AccountRole::SuperAdmin] {
            for verb in [Verb::Get, Verb::Post, Verb::Put, Verb::Patch, Verb::Delete] {
                assert!(authorize(role, verb).is_ok());
            }
        }
    }

    #[test]
    fn test_unlisted_methods_have_no_verb() {
        assert_eq!(Verb::from_method("OPTIONS"), None);
        assert_eq!(Verb::from_method("HEAD"), None);
        assert_eq!(Verb::from_method("DELETE"), Some(Verb::Delete));
    }

    #[test]
    fn test_denial_message_names_the_verb() {
        let err = authorize(AccountRole::Member, Verb::Post).unwrap_err();
        assert!(err.message.contains("POST"));
        assert!(err.message.contains("member"));
    }
}
