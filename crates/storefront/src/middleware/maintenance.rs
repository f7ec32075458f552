//! Maintenance-mode gate.
//!
//! When the `maintenance_mode` flag is set in site settings, every public
//! route answers 503 with a small holding payload instead of its normal
//! response. The flag is read through the shared settings cache, so flipping
//! it in the admin panel takes effect within the cache TTL without a
//! redeploy. `/health` stays reachable so platform health checks keep passing
//! while the store is down.

use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::state::AppState;

/// Reject requests with 503 while maintenance mode is on.
pub async fn maintenance_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path().starts_with("/health") {
        return next.run(request).await;
    }

    match state.site_settings().await {
        Ok(settings) if settings.maintenance_mode => {
            let store_name = if settings.store_name.is_empty() {
                "The store".to_owned()
            } else {
                settings.store_name
            };
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": "maintenance",
                    "message": format!("{store_name} is temporarily down for maintenance."),
                })),
            )
                .into_response()
        }
        Ok(_) => next.run(request).await,
        // A failed settings read must not take the storefront down with it.
        Err(error) => {
            tracing::warn!(%error, "failed to load site settings for maintenance check");
            next.run(request).await
        }
    }
}
