//! Append-only product audit trail.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use auric_core::{ChangeType, Email, Product, ProductHistoryId, ProductId};

use super::RepositoryError;
use crate::models::ProductHistoryEntry;

#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    id: i32,
    product_id: i32,
    product_external_id: Uuid,
    version: i32,
    snapshot: serde_json::Value,
    changed_by: String,
    change_type: String,
    changed_at: DateTime<Utc>,
}

impl TryFrom<HistoryRow> for ProductHistoryEntry {
    type Error = RepositoryError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        let change_type: ChangeType = row
            .change_type
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid change type: {e}")))?;

        Ok(Self {
            id: ProductHistoryId::new(row.id),
            product_id: ProductId::new(row.product_id),
            product_external_id: row.product_external_id,
            version: row.version,
            snapshot: row.snapshot,
            changed_by: row.changed_by,
            change_type,
            changed_at: row.changed_at,
        })
    }
}

/// Append one audit row for a product mutation.
///
/// Runs inside the caller's transaction so a history entry exists exactly
/// when the mutation it records committed.
pub(crate) async fn append(
    tx: &mut Transaction<'_, Postgres>,
    product: &Product,
    snapshot: serde_json::Value,
    actor: &Email,
    change_type: ChangeType,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO product_history (
            product_id, product_external_id, version, snapshot,
            changed_by, change_type
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        ",
    )
    .bind(product.id)
    .bind(product.external_id)
    .bind(product.version)
    .bind(snapshot)
    .bind(actor.as_str())
    .bind(change_type.as_str())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Repository for reading a product's audit trail.
pub struct ProductHistoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductHistoryRepository<'a> {
    /// Create a new history repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a product's history, newest version first.
    ///
    /// Keyed by external ID so the trail stays readable after the product
    /// row itself is deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_for_product(
        &self,
        product_external_id: Uuid,
    ) -> Result<Vec<ProductHistoryEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r"
            SELECT id, product_id, product_external_id, version, snapshot,
                   changed_by, change_type, changed_at
            FROM product_history
            WHERE product_external_id = $1
            ORDER BY changed_at DESC, id DESC
            ",
        )
        .bind(product_external_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
