//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                              - Liveness check
//! GET    /health/ready                        - Readiness check (database)
//!
//! # Auth (session cookie)
//! POST   /auth/login                          - Log in with email + password
//! POST   /auth/logout                         - Log out
//! GET    /auth/me                             - Current session's admin
//! POST   /auth/password                       - Change own password
//!
//! # Staff accounts (super admin only)
//! GET    /api/admins                          - List staff accounts
//! POST   /api/admins                          - Create staff account
//! DELETE /api/admins/{id}                     - Remove staff account
//!
//! # Products (authenticated)
//! GET    /api/products                        - List catalog
//! POST   /api/products                        - Create product
//! GET    /api/products/{external_id}          - Product detail
//! PUT    /api/products/{external_id}          - Replace product (bumps version)
//! DELETE /api/products/{external_id}          - Delete product (+ hosted images)
//! GET    /api/products/{external_id}/history  - Audit trail
//!
//! # Categories (authenticated)
//! GET    /api/categories                      - List all, active and inactive
//! POST   /api/categories                      - Create category
//! GET    /api/categories/{external_id}        - Category detail
//! PUT    /api/categories/{external_id}        - Replace category
//! DELETE /api/categories/{external_id}        - Delete category
//!
//! # Submissions (authenticated)
//! GET    /api/submissions                     - List, optional ?status= filter
//! PATCH  /api/submissions/{id}                - Update status / notes
//! DELETE /api/submissions/{id}                - Delete submission
//!
//! # Settings (authenticated)
//! GET    /api/settings                        - Site settings document
//! PUT    /api/settings                        - Replace site settings
//!
//! # Media (authenticated)
//! POST   /api/media                           - Proxy-upload an image
//! DELETE /api/media/{asset_id}                - Delete a hosted image
//! ```
//!
//! Everything under `/api` and `/auth/me` requires a logged-in session via
//! the [`RequireAdminAuth`](crate::middleware::auth::RequireAdminAuth)
//! extractor; staff-account management additionally requires the
//! `super_admin` role. Login, logout, and health checks are open.

pub mod admins;
pub mod auth;
pub mod categories;
pub mod media;
pub mod products;
pub mod settings;
pub mod submissions;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// API routes nested under `/api`.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/admins", get(admins::index).post(admins::create))
        .route("/admins/{id}", delete(admins::destroy))
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{external_id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
        .route("/products/{external_id}/history", get(products::history))
        .route(
            "/categories",
            get(categories::index).post(categories::create),
        )
        .route(
            "/categories/{external_id}",
            get(categories::show)
                .put(categories::update)
                .delete(categories::destroy),
        )
        .route("/submissions", get(submissions::index))
        .route(
            "/submissions/{id}",
            patch(submissions::update).delete(submissions::destroy),
        )
        .route("/settings", get(settings::show).put(settings::update))
        // uploads need more than axum's default 2 MB body cap
        .route(
            "/media",
            post(media::upload).layer(DefaultBodyLimit::max(media::UPLOAD_BODY_LIMIT)),
        )
        .route("/media/{asset_id}", delete(media::destroy))
}

/// Build the full admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/password", post(auth::change_password))
        .nest("/api", api_routes())
}

async fn health() -> &'static str {
    "OK"
}
