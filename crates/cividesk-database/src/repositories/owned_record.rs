//! Owner-column lookup for ownership-scoped record routes.

use sqlx::PgPool;

use cividesk_core::config::ownership::OwnershipMapping;
use cividesk_core::error::{AppError, ErrorKind};
use cividesk_core::result::AppResult;

/// Fetches the configured owner column of a record by id.
///
/// The table and column names come from the startup-validated ownership
/// registry; only the record id is ever bound as a parameter.
#[derive(Debug, Clone)]
pub struct OwnedRecordRepository {
    pool: PgPool,
}

impl OwnedRecordRepository {
    /// Create a new owned-record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the owner value for a record.
    ///
    /// Outer `None` means the record does not exist (a not-found outcome,
    /// distinct from denial); inner `None` means the row exists but its
    /// owner column is NULL.
    pub async fn fetch_owner(
        &self,
        mapping: &OwnershipMapping,
        record_id: &str,
    ) -> AppResult<Option<Option<String>>> {
        let sql = format!(
            "SELECT {owner}::text FROM {table} WHERE {id}::text = $1",
            owner = mapping.owner_column,
            table = mapping.table,
            id = mapping.id_column,
        );

        let row = sqlx::query_as::<_, (Option<String>,)>(&sql)
            .bind(record_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch record owner", e)
            })?;

        Ok(row.map(|(owner,)| owner))
    }
}
