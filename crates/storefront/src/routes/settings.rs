//! Public site settings route.

use axum::{Json, extract::State};
use tracing::instrument;

use auric_core::SiteSettings;

use crate::error::Result;
use crate::state::AppState;

/// Serve the public site settings document.
///
/// GET /api/settings
///
/// Served from the shared settings cache, so reads here do not hit the
/// database on every request.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    let settings = state.site_settings().await?;
    Ok(Json(settings))
}
