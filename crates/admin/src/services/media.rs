//! Thin client for the external media host.
//!
//! Product images are uploaded through this proxy so the media host's API
//! key never reaches a browser. The host's API is a plain HTTP surface:
//! multipart `POST /assets` returning the hosted URL and asset ID, and
//! `DELETE /assets/{asset_id}`.

use core::fmt;

use reqwest::multipart;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::MediaConfig;

/// Errors from media-host operations.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The host answered with an error status.
    #[error("media host error: {status} - {message}")]
    Api {
        /// HTTP status returned by the host.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// The upload itself was malformed (bad content type, empty file).
    #[error("invalid upload: {0}")]
    InvalidUpload(String),
}

/// A hosted asset as returned by the media host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAsset {
    /// Public URL of the hosted image.
    pub url: String,
    /// Host-side asset ID, used for deletion.
    pub asset_id: String,
}

/// Client for the media host.
#[derive(Clone)]
pub struct MediaClient {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl fmt::Debug for MediaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

async fn error_from_response(response: reqwest::Response) -> MediaError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    let message = message.chars().take(500).collect();
    MediaError::Api { status, message }
}

impl MediaClient {
    /// Create a new media-host client.
    #[must_use]
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Upload one image, returning its hosted URL and asset ID.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::InvalidUpload` for an empty file or unusable
    /// content type, `MediaError::Api` when the host rejects the upload,
    /// and `MediaError::Http` for transport failures.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaAsset, MediaError> {
        if bytes.is_empty() {
            return Err(MediaError::InvalidUpload("empty file".to_owned()));
        }

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str(content_type)
            .map_err(|e| MediaError::InvalidUpload(format!("bad content type: {e}")))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/assets", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// Delete a hosted asset.
    ///
    /// Deleting an already-deleted asset succeeds, so cleanup after product
    /// deletion can be retried safely.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Api` when the host answers with a non-404 error
    /// status and `MediaError::Http` for transport failures.
    #[instrument(skip(self))]
    pub async fn delete(&self, asset_id: &str) -> Result<(), MediaError> {
        let response = self
            .client
            .delete(format!("{}/assets/{asset_id}", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await?;

        if response.status().is_success() || response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        Err(error_from_response(response).await)
    }
}
