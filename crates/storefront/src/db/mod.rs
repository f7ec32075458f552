//! Database operations for the storefront.
//!
//! The storefront shares the catalog database with the admin binary but only
//! ever reads catalog data; its single write path is inserting contact
//! submissions. Schema migrations live in `crates/admin/migrations/` and run
//! via:
//!
//! ```bash
//! cargo run -p auric-cli -- migrate
//! ```
//!
//! All queries use the sqlx runtime API (not the `query!` macros) so the
//! workspace compiles without a live database or offline cache.

pub mod categories;
pub mod products;
pub mod settings;
pub mod submissions;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
