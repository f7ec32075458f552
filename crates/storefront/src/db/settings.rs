//! Site settings reads.
//!
//! Settings live in a keyed JSONB table written by the admin binary; the
//! storefront only reads the `site` document.

use sqlx::PgPool;

use auric_core::SiteSettings;

use super::RepositoryError;

/// The settings key holding the site-wide document.
pub const SITE_SETTINGS_KEY: &str = "site";

/// Load the site settings document.
///
/// Returns defaults when the document has never been written, so a fresh
/// deployment serves sensible values before staff first save settings.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
/// Returns `RepositoryError::DataCorruption` if the stored JSON is invalid.
pub async fn get_site_settings(pool: &PgPool) -> Result<SiteSettings, RepositoryError> {
    let value: Option<(serde_json::Value,)> =
        sqlx::query_as("SELECT value FROM site_settings WHERE key = $1")
            .bind(SITE_SETTINGS_KEY)
            .fetch_optional(pool)
            .await?;

    match value {
        Some((json,)) => serde_json::from_value(json)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid settings JSON: {e}"))),
        None => Ok(SiteSettings::default()),
    }
}
