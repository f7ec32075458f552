//! Category management repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use auric_core::{Category, CategoryId, Slug};

use super::RepositoryError;

/// Validated category fields for create/update.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    /// Display name.
    pub name: String,
    /// URL slug, unique per category.
    pub slug: Slug,
    /// Hosted banner/tile image URL.
    pub image_url: Option<String>,
    /// Short description shown on the category page.
    pub description: Option<String>,
    /// Position in storefront listings, ascending.
    pub display_order: i32,
    /// Whether the category is publicly visible.
    pub active: bool,
}

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
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid slug: {e}")))?;

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

const CATEGORY_COLUMNS: &str = r"
    id, external_id, name, slug, image_url, description,
    display_order, active, created_at, updated_at
";

/// Repository for staff category management.
pub struct AdminCategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminCategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, active and inactive, in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM category ORDER BY display_order ASC, id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a category by its external ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_external_id(
        &self,
        external_id: Uuid,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM category WHERE external_id = $1"
        ))
        .bind(external_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &CategoryInput) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            r"
            INSERT INTO category (name, slug, image_url, description, display_order, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CATEGORY_COLUMNS}
            "
        ))
        .bind(&input.name)
        .bind(input.slug.as_str())
        .bind(input.image_url.as_deref())
        .bind(input.description.as_deref())
        .bind(input.display_order)
        .bind(input.active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "slug already exists"))?;

        row.try_into()
    }

    /// Replace a category's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new slug is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        external_id: Uuid,
        input: &CategoryInput,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            r"
            UPDATE category
            SET name = $1, slug = $2, image_url = $3, description = $4,
                display_order = $5, active = $6, updated_at = NOW()
            WHERE external_id = $7
            RETURNING {CATEGORY_COLUMNS}
            "
        ))
        .bind(&input.name)
        .bind(input.slug.as_str())
        .bind(input.image_url.as_deref())
        .bind(input.description.as_deref())
        .bind(input.display_order)
        .bind(input.active)
        .bind(external_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "slug already exists"))?;

        row.map_or(Err(RepositoryError::NotFound), TryInto::try_into)
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, external_id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM category WHERE external_id = $1")
            .bind(external_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
