//! Site settings reads and upserts.
//!
//! Settings live in a keyed JSONB table; the whole document is replaced on
//! every save so partial-write races can't produce a torn document.

use sqlx::PgPool;

use auric_core::SiteSettings;

use super::RepositoryError;

/// The settings key holding the site-wide document.
pub const SITE_SETTINGS_KEY: &str = "site";

/// Load the site settings document, defaulting when never written.
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

/// Replace the site settings document, creating it when absent.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the upsert fails.
/// Returns `RepositoryError::DataCorruption` if the document can't be encoded.
pub async fn upsert_site_settings(
    pool: &PgPool,
    settings: &SiteSettings,
) -> Result<(), RepositoryError> {
    let value = serde_json::to_value(settings)
        .map_err(|e| RepositoryError::DataCorruption(format!("failed to encode settings: {e}")))?;

    sqlx::query(
        r"
        INSERT INTO site_settings (key, value, updated_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (key) DO UPDATE
        SET value = EXCLUDED.value, updated_at = NOW()
        ",
    )
    .bind(SITE_SETTINGS_KEY)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}
