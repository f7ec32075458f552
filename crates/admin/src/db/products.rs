//! Product write repository with audit-trail bookkeeping.
//!
//! Every mutation appends one `product_history` row inside the same
//! transaction as the change itself, so the trail can never miss or
//! double-count a version.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use auric_core::{
    ChangeType, Email, Product, ProductCategory, ProductDraft, ProductId, ProductImage,
};

use super::{RepositoryError, history};

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

fn encode_images(images: &[ProductImage]) -> Result<serde_json::Value, RepositoryError> {
    serde_json::to_value(images)
        .map_err(|e| RepositoryError::DataCorruption(format!("failed to encode images: {e}")))
}

fn snapshot(product: &Product) -> Result<serde_json::Value, RepositoryError> {
    serde_json::to_value(product)
        .map_err(|e| RepositoryError::DataCorruption(format!("failed to encode snapshot: {e}")))
}

/// Repository for staff product management.
pub struct AdminProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full catalog, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product ORDER BY updated_at DESC, id ASC"
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

    /// Create a product from a validated draft and record a `created`
    /// history entry.
    ///
    /// Callers must run [`ProductDraft::validate`] first; this method assumes
    /// the draft's images are already normalized.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the SKU is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        draft: &ProductDraft,
        actor: &Email,
    ) -> Result<Product, RepositoryError> {
        let images = encode_images(&draft.images)?;
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            INSERT INTO product (
                sku, title, description, price, discount_price, category,
                material, in_stock, stock_quantity, is_new, is_featured,
                popularity, rating, tags, images
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(draft.sku.trim())
        .bind(draft.title.trim())
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.discount_price)
        .bind(draft.category.as_str())
        .bind(&draft.material)
        .bind(draft.in_stock)
        .bind(draft.stock_quantity)
        .bind(draft.is_new)
        .bind(draft.is_featured)
        .bind(draft.popularity)
        .bind(draft.rating)
        .bind(&draft.tags)
        .bind(images)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "SKU already exists"))?;

        let product: Product = row.try_into()?;
        history::append(
            &mut tx,
            &product,
            snapshot(&product)?,
            actor,
            ChangeType::Created,
        )
        .await?;

        tx.commit().await?;
        Ok(product)
    }

    /// Replace a product's fields from a validated draft, bump its version
    /// atomically, and record an `updated` history entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new SKU is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        external_id: Uuid,
        draft: &ProductDraft,
        actor: &Email,
    ) -> Result<Product, RepositoryError> {
        let images = encode_images(&draft.images)?;
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            UPDATE product
            SET sku = $1, title = $2, description = $3, price = $4,
                discount_price = $5, category = $6, material = $7,
                in_stock = $8, stock_quantity = $9, is_new = $10,
                is_featured = $11, popularity = $12, rating = $13,
                tags = $14, images = $15,
                version = version + 1, updated_at = NOW()
            WHERE external_id = $16
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(draft.sku.trim())
        .bind(draft.title.trim())
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.discount_price)
        .bind(draft.category.as_str())
        .bind(&draft.material)
        .bind(draft.in_stock)
        .bind(draft.stock_quantity)
        .bind(draft.is_new)
        .bind(draft.is_featured)
        .bind(draft.popularity)
        .bind(draft.rating)
        .bind(&draft.tags)
        .bind(images)
        .bind(external_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "SKU already exists"))?;

        let Some(row) = row else {
            return Err(RepositoryError::NotFound);
        };

        let product: Product = row.try_into()?;
        history::append(
            &mut tx,
            &product,
            snapshot(&product)?,
            actor,
            ChangeType::Updated,
        )
        .await?;

        tx.commit().await?;
        Ok(product)
    }

    /// Delete a product, recording a final `deleted` history snapshot first.
    ///
    /// Returns the deleted product so callers can clean up its hosted
    /// images afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, external_id: Uuid, actor: &Email) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE external_id = $1"
        ))
        .bind(external_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Err(RepositoryError::NotFound);
        };
        let product: Product = row.try_into()?;

        history::append(
            &mut tx,
            &product,
            snapshot(&product)?,
            actor,
            ChangeType::Deleted,
        )
        .await?;

        // product_history keeps no FK to product so the trail outlives the row
        sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(product.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(11),
            external_id: Uuid::new_v4(),
            sku: "AUR-N-001".to_owned(),
            title: "Pendant Necklace".to_owned(),
            description: "18k gold pendant.".to_owned(),
            price: Decimal::from(900),
            discount_price: None,
            category: ProductCategory::Necklaces,
            material: "18k gold".to_owned(),
            in_stock: true,
            stock_quantity: 2,
            is_new: true,
            is_featured: false,
            popularity: 70,
            rating: None,
            tags: vec!["pendant".to_owned()],
            images: vec![ProductImage {
                url: "https://img.auricjewelry.co/n-001.jpg".to_owned(),
                asset_id: "asset-n-001".to_owned(),
                position: 0,
                featured: true,
            }],
            version: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_snapshot_captures_the_versioned_state() {
        let product = sample_product();
        let snap = snapshot(&product).expect("product snapshots are serializable");

        assert_eq!(
            snap.get("version").and_then(serde_json::Value::as_i64),
            Some(3)
        );
        assert_eq!(
            snap.get("sku").and_then(serde_json::Value::as_str),
            Some("AUR-N-001")
        );
        assert_eq!(
            snap.get("images")
                .and_then(serde_json::Value::as_array)
                .map(Vec::len),
            Some(1)
        );
    }

    #[test]
    fn test_encode_images_preserves_order() {
        let images = vec![
            ProductImage {
                url: "https://img.auricjewelry.co/a.jpg".to_owned(),
                asset_id: "a".to_owned(),
                position: 0,
                featured: true,
            },
            ProductImage {
                url: "https://img.auricjewelry.co/b.jpg".to_owned(),
                asset_id: "b".to_owned(),
                position: 1,
                featured: false,
            },
        ];

        let encoded = encode_images(&images).expect("images are serializable");
        let decoded: Vec<ProductImage> =
            serde_json::from_value(encoded).expect("encoded images decode");
        assert_eq!(decoded.len(), 2);
        assert_eq!(
            decoded.first().map(|i| i.asset_id.as_str()),
            Some("a")
        );
    }
}
