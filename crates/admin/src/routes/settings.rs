//! Site settings reads and upserts.

use axum::{Json, extract::State};

use auric_core::SiteSettings;

use crate::db::settings::{get_site_settings, upsert_site_settings};
use crate::error::Result;
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

/// `GET /api/settings` - the full site settings document.
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<SiteSettings>> {
    let settings = get_site_settings(state.pool()).await?;
    Ok(Json(settings))
}

/// `PUT /api/settings` - replace the site settings document.
///
/// The storefront picks the change up within its cache TTL; there is no
/// cross-process invalidation.
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(settings): Json<SiteSettings>,
) -> Result<Json<SiteSettings>> {
    upsert_site_settings(state.pool(), &settings).await?;

    tracing::info!(
        admin_email = %admin.email,
        maintenance_mode = settings.maintenance_mode,
        "site settings updated"
    );
    Ok(Json(settings))
}
