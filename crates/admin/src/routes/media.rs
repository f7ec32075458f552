//! Image upload proxying.
//!
//! Browsers never talk to the media host directly; uploads pass through
//! here so the host's API key stays server-side.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::services::media::{MediaAsset, MediaClient};
use crate::state::AppState;

/// Largest accepted upload, in bytes (8 MiB).
const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Request-body cap for the upload route. Must exceed [`MAX_UPLOAD_BYTES`]
/// by enough headroom for multipart boundaries and part headers, otherwise
/// the body limit rejects full-size files before the handler sees them.
pub(crate) const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

fn require_media(state: &AppState) -> Result<&MediaClient> {
    state.media().ok_or_else(|| {
        AppError::Unavailable("media host is not configured; uploads are disabled".to_owned())
    })
}

/// `POST /api/media` - proxy-upload an image to the media host.
///
/// Expects a multipart body with a single `file` field.
pub async fn upload(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MediaAsset>)> {
    let media = require_media(&state)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_owned();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest(format!(
                "file exceeds {MAX_UPLOAD_BYTES} bytes"
            )));
        }

        let asset = media
            .upload(&file_name, &content_type, bytes.to_vec())
            .await?;

        tracing::info!(
            admin_email = %admin.email,
            asset_id = %asset.asset_id,
            "image uploaded"
        );
        return Ok((StatusCode::CREATED, Json(asset)));
    }

    Err(AppError::BadRequest(
        "multipart body must contain a 'file' field".to_owned(),
    ))
}

/// `DELETE /api/media/{asset_id}` - delete a hosted image.
pub async fn destroy(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> Result<StatusCode> {
    let media = require_media(&state)?;
    media.delete(&asset_id).await?;

    tracing::info!(admin_email = %admin.email, %asset_id, "hosted image deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_limit_fits_a_full_size_upload() {
        // multipart framing (boundary lines, part headers) rides on top of
        // the file bytes, so the route's body cap needs headroom past the
        // largest file we accept
        assert!(UPLOAD_BODY_LIMIT > MAX_UPLOAD_BYTES);
        assert!(UPLOAD_BODY_LIMIT - MAX_UPLOAD_BYTES >= 4096);
    }
}
