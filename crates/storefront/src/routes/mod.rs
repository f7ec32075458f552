//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Health check
//!
//! # Catalog
//! GET  /api/products              - Product listing (filter/sort/search)
//! GET  /api/products/{id}         - Product detail by external ID
//! GET  /api/categories            - Active categories, in display order
//!
//! # Site
//! GET  /api/settings              - Public site settings
//! POST /api/contact               - Contact form submission (rate limited)
//! ```

pub mod categories;
pub mod contact;
pub mod products;
pub mod settings;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the public API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{external_id}", get(products::show))
        .route("/categories", get(categories::index))
        .route("/settings", get(settings::show))
        .route("/contact", post(contact::submit))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "OK"
}
