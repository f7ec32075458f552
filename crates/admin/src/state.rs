//! Shared application state for the admin API.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::services::media::MediaClient;

/// Shared state handed to every handler.
///
/// Cheap to clone; the inner state lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    media: Option<MediaClient>,
}

impl AppState {
    /// Build the state from loaded configuration and a connected pool.
    ///
    /// The media client is only constructed when the media host is
    /// configured; without it, upload routes answer 503.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        let media = config.media.as_ref().map(MediaClient::new);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                media,
            }),
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// The media-host client, when configured.
    #[must_use]
    pub fn media(&self) -> Option<&MediaClient> {
        self.inner.media.as_ref()
    }
}
