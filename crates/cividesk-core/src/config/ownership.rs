//! Ownership registry configuration.
//!
//! Declares, per single-record entity, which table/column pair identifies a
//! record and which column names its owning account. The registry is
//! external configuration consumed by the ownership check; it is validated
//! once at startup so malformed identifiers can never reach SQL assembly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Ownership registry: entity name → table/column mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnershipConfig {
    /// Mappings keyed by entity name (e.g. `"student"`).
    #[serde(default)]
    pub entities: HashMap<String, OwnershipMapping>,
}

/// Table and column names locating a record and its owner value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipMapping {
    /// Table holding the records.
    pub table: String,
    /// Primary-key column.
    pub id_column: String,
    /// Column holding the owner's email or account id.
    pub owner_column: String,
}

impl OwnershipConfig {
    /// Look up the mapping for an entity name.
    pub fn get(&self, entity: &str) -> Option<&OwnershipMapping> {
        self.entities.get(entity)
    }

    /// Validate every identifier in the registry.
    pub fn validate(&self) -> Result<(), AppError> {
        for (entity, mapping) in &self.entities {
            for ident in [&mapping.table, &mapping.id_column, &mapping.owner_column] {
                if !is_sql_identifier(ident) {
                    return Err(AppError::configuration(format!(
                        "ownership entity '{entity}': '{ident}' is not a valid identifier"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Accepts lowercase snake_case SQL identifiers only.
fn is_sql_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(table: &str, id: &str, owner: &str) -> OwnershipConfig {
        let mut entities = HashMap::new();
        entities.insert(
            "student".to_string(),
            OwnershipMapping {
                table: table.to_string(),
                id_column: id.to_string(),
                owner_column: owner.to_string(),
            },
        );
        OwnershipConfig { entities }
    }

    #[test]
    fn test_valid_identifiers() {
        assert!(registry("students", "id", "guardian_email").validate().is_ok());
        assert!(registry("_tmp", "id2", "owner").validate().is_ok());
    }

    #[test]
    fn test_rejects_injection_shapes() {
        assert!(registry("students; DROP TABLE x", "id", "email").validate().is_err());
        assert!(registry("students", "id", "email -- comment").validate().is_err());
        assert!(registry("Students", "id", "email").validate().is_err());
        assert!(registry("", "id", "email").validate().is_err());
        assert!(registry("students", "1id", "email").validate().is_err());
    }
}
