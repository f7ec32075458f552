//! Category CRUD.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use auric_core::{Category, Slug};

use crate::db::categories::{AdminCategoryRepository, CategoryInput};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

/// Category create/update request body.
///
/// The slug arrives as a plain string and is validated here so malformed
/// slugs answer 400 instead of leaking a database error.
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    /// Display name.
    pub name: String,
    /// URL slug; lowercased and validated.
    pub slug: String,
    /// Hosted banner/tile image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
    /// Position in storefront listings.
    #[serde(default)]
    pub display_order: i32,
    /// Whether the category is publicly visible.
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl CategoryPayload {
    fn into_input(self) -> Result<CategoryInput> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(AppError::BadRequest("name is required".to_owned()));
        }

        let slug = Slug::parse(&self.slug)
            .map_err(|e| AppError::BadRequest(format!("invalid slug: {e}")))?;

        Ok(CategoryInput {
            name,
            slug,
            image_url: self.image_url,
            description: self.description,
            display_order: self.display_order,
            active: self.active,
        })
    }
}

/// `GET /api/categories` - all categories in display order.
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>> {
    let categories = AdminCategoryRepository::new(state.pool()).list_all().await?;
    Ok(Json(categories))
}

/// `GET /api/categories/{external_id}` - one category.
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(external_id): Path<Uuid>,
) -> Result<Json<Category>> {
    let category = AdminCategoryRepository::new(state.pool())
        .get_by_external_id(external_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {external_id}")))?;
    Ok(Json(category))
}

/// `POST /api/categories` - create a category.
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>)> {
    let input = payload.into_input()?;
    let category = AdminCategoryRepository::new(state.pool())
        .create(&input)
        .await?;

    tracing::info!(category_id = %category.id, slug = %category.slug, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// `PUT /api/categories/{external_id}` - replace a category's fields.
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(external_id): Path<Uuid>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>> {
    let input = payload.into_input()?;
    let category = AdminCategoryRepository::new(state.pool())
        .update(external_id, &input)
        .await?;

    tracing::info!(category_id = %category.id, slug = %category.slug, "category updated");
    Ok(Json(category))
}

/// `DELETE /api/categories/{external_id}` - delete a category.
pub async fn destroy(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(external_id): Path<Uuid>,
) -> Result<StatusCode> {
    AdminCategoryRepository::new(state.pool())
        .delete(external_id)
        .await?;

    tracing::info!(%external_id, "category deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(slug: &str) -> CategoryPayload {
        CategoryPayload {
            name: "Engagement Rings".to_owned(),
            slug: slug.to_owned(),
            image_url: None,
            description: None,
            display_order: 0,
            active: true,
        }
    }

    #[test]
    fn test_payload_slug_is_normalized() {
        let input = payload("Engagement-Rings").into_input().expect("valid");
        assert_eq!(input.slug.as_str(), "engagement-rings");
    }

    #[test]
    fn test_payload_rejects_bad_slug_and_empty_name() {
        assert!(payload("no spaces allowed").into_input().is_err());

        let mut p = payload("rings");
        p.name = "   ".to_owned();
        assert!(p.into_input().is_err());
    }
}
