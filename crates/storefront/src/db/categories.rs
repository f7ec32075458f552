//! Read-only category queries for the public catalog.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use auric_core::{Category, CategoryId, Slug};

use super::RepositoryError;

/// Internal row type for category queries.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    external_id: Uuid,
    name: String,
    slug: String,
    image_url: Option<String>,
    description: Option<String>,
    display_order: i32,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = RepositoryError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        let slug = Slug::parse(&row.slug)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid slug in database: {e}")))?;

        Ok(Self {
            id: CategoryId::new(row.id),
            external_id: row.external_id,
            name: row.name,
            slug,
            image_url: row.image_url,
            description: row.description,
            display_order: row.display_order,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for public category reads.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active categories in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_active(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, external_id, name, slug, image_url, description,
                   display_order, active, created_at, updated_at
            FROM category
            WHERE active = TRUE
            ORDER BY display_order ASC, name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
