//! Category domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::CategoryId;
use super::slug::Slug;

/// A catalog grouping shown on the storefront.
///
/// Categories are staff-managed display groupings; the coarse
/// [`ProductCategory`](super::status::ProductCategory) enum on each product is
/// what filtering keys on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Database primary key.
    pub id: CategoryId,
    /// Stable external identifier exposed through the API.
    pub external_id: Uuid,
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
    /// Inactive categories are hidden from the public catalog.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}
