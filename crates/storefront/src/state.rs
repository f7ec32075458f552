//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use auric_core::SiteSettings;

use crate::config::StorefrontConfig;
use crate::middleware::rate_limit::FixedWindowLimiter;
use crate::services::email::Mailer;

/// How long cached site settings stay fresh before the next request re-reads
/// them from the database.
const SETTINGS_CACHE_TTL: Duration = Duration::from_secs(30);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    settings_cache: Cache<&'static str, SiteSettings>,
    contact_limiter: FixedWindowLimiter,
    mailer: Option<Mailer>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured SMTP relay hostname is invalid.
    pub fn new(
        config: StorefrontConfig,
        pool: PgPool,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let settings_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(SETTINGS_CACHE_TTL)
            .build();
        let contact_limiter = FixedWindowLimiter::new(&config.contact_rate_limit);
        let mailer = config.smtp.as_ref().map(Mailer::new).transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                settings_cache,
                contact_limiter,
                mailer,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the shared site-settings cache.
    #[must_use]
    pub fn settings_cache(&self) -> &Cache<&'static str, SiteSettings> {
        &self.inner.settings_cache
    }

    /// Get a reference to the contact-form rate limiter.
    #[must_use]
    pub fn contact_limiter(&self) -> &FixedWindowLimiter {
        &self.inner.contact_limiter
    }

    /// Get the inquiry-notification mailer, when SMTP is configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&Mailer> {
        self.inner.mailer.as_ref()
    }

    /// Current site settings, served from the cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns an error when the settings row cannot be read.
    pub async fn site_settings(&self) -> Result<SiteSettings, crate::db::RepositoryError> {
        if let Some(settings) = self.inner.settings_cache.get("site").await {
            return Ok(settings);
        }

        let settings = crate::db::settings::get_site_settings(self.pool()).await?;
        self.inner
            .settings_cache
            .insert("site", settings.clone())
            .await;
        Ok(settings)
    }
}
