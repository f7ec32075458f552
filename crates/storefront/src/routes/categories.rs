//! Public category routes.

use axum::{Json, extract::State};
use tracing::instrument;

use auric_core::Category;

use crate::db::categories::CategoryRepository;
use crate::error::Result;
use crate::state::AppState;

/// List active categories in display order.
///
/// GET /api/categories
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list_active().await?;
    Ok(Json(categories))
}
