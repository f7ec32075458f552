//! Product CRUD with audit history.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use auric_core::{Product, ProductDraft};

use crate::db::history::ProductHistoryRepository;
use crate::db::products::AdminProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::models::ProductHistoryEntry;
use crate::state::AppState;

/// `GET /api/products` - full catalog, most recently updated first.
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>> {
    let products = AdminProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}

/// `GET /api/products/{external_id}` - one product.
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(external_id): Path<Uuid>,
) -> Result<Json<Product>> {
    let product = AdminProductRepository::new(state.pool())
        .get_by_external_id(external_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {external_id}")))?;
    Ok(Json(product))
}

/// `POST /api/products` - create a product and its `created` audit entry.
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(mut draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>)> {
    draft.validate()?;

    let product = AdminProductRepository::new(state.pool())
        .create(&draft, &admin.email)
        .await?;

    tracing::info!(product_id = %product.id, sku = %product.sku, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/{external_id}` - replace a product's fields.
///
/// Bumps the version atomically and appends an `updated` audit entry.
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(external_id): Path<Uuid>,
    Json(mut draft): Json<ProductDraft>,
) -> Result<Json<Product>> {
    draft.validate()?;

    let product = AdminProductRepository::new(state.pool())
        .update(external_id, &draft, &admin.email)
        .await?;

    tracing::info!(product_id = %product.id, version = product.version, "product updated");
    Ok(Json(product))
}

/// `DELETE /api/products/{external_id}` - delete a product.
///
/// Writes a final `deleted` audit snapshot, removes the row, then
/// best-effort deletes the hosted images; image cleanup failures are
/// logged, never surfaced.
pub async fn destroy(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(external_id): Path<Uuid>,
) -> Result<StatusCode> {
    let product = AdminProductRepository::new(state.pool())
        .delete(external_id, &admin.email)
        .await?;

    if let Some(media) = state.media() {
        for image in &product.images {
            if let Err(e) = media.delete(&image.asset_id).await {
                tracing::warn!(
                    asset_id = %image.asset_id,
                    error = %e,
                    "failed to delete hosted image for removed product"
                );
            }
        }
    }

    tracing::info!(product_id = %product.id, sku = %product.sku, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/products/{external_id}/history` - audit trail, newest first.
///
/// Works for deleted products too; the trail is keyed by external ID.
pub async fn history(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(external_id): Path<Uuid>,
) -> Result<Json<Vec<ProductHistoryEntry>>> {
    let entries = ProductHistoryRepository::new(state.pool())
        .list_for_product(external_id)
        .await?;
    Ok(Json(entries))
}
