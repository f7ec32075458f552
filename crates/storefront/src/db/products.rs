//! Read-only product queries for the public catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use auric_core::{Product, ProductCategory, ProductId, ProductImage};

use super::RepositoryError;

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    external_id: Uuid,
    sku: String,
    title: String,
    description: String,
    price: Decimal,
    discount_price: Option<Decimal>,
    category: String,
    material: String,
    in_stock: bool,
    stock_quantity: i32,
    is_new: bool,
    is_featured: bool,
    popularity: i32,
    rating: Option<Decimal>,
    tags: Vec<String>,
    images: serde_json::Value,
    version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category: ProductCategory = row.category.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid product category: {e}"))
        })?;

        let images: Vec<ProductImage> = serde_json::from_value(row.images)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid image data: {e}")))?;

        Ok(Self {
            id: ProductId::new(row.id),
            external_id: row.external_id,
            sku: row.sku,
            title: row.title,
            description: row.description,
            price: row.price,
            discount_price: row.discount_price,
            category,
            material: row.material,
            in_stock: row.in_stock,
            stock_quantity: row.stock_quantity,
            is_new: row.is_new,
            is_featured: row.is_featured,
            popularity: row.popularity,
            rating: row.rating,
            tags: row.tags,
            images,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PRODUCT_COLUMNS: &str = r"
    id, external_id, sku, title, description, price, discount_price,
    category, material, in_stock, stock_quantity, is_new, is_featured,
    popularity, rating, tags, images, version, created_at, updated_at
";

/// Repository for public product reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the full catalog, most popular first.
    ///
    /// Filtering, sorting, and search run in memory over this list (see
    /// [`crate::catalog`]); the catalog is small enough that the database is
    /// only asked for the base set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product ORDER BY popularity DESC, id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a product by its external ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_external_id(
        &self,
        external_id: Uuid,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE external_id = $1"
        ))
        .bind(external_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}
