//! Authentication extractors.
//!
//! The admin API is JSON-only, so every rejection is a JSON error body
//! rather than a login redirect.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use auric_core::AdminRole;

use crate::models::{CurrentAdmin, session_keys};

/// Extractor that requires a logged-in staff session.
///
/// ```rust,ignore
/// async fn handler(RequireAdminAuth(admin): RequireAdminAuth) -> impl IntoResponse {
///     format!("hello, {}", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Rejection for [`RequireAdminAuth`] and [`RequireSuperAdmin`].
pub enum AuthRejection {
    /// No valid session.
    Unauthorized,
    /// Logged in, but the role doesn't permit the operation.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "authentication required"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "insufficient role"),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

async fn current_admin(parts: &Parts) -> Option<CurrentAdmin> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_admin(parts)
            .await
            .map(Self)
            .ok_or(AuthRejection::Unauthorized)
    }
}

/// Extractor that requires a logged-in super admin.
///
/// Rejects with 403 when the session belongs to a lower role.
pub struct RequireSuperAdmin(pub CurrentAdmin);

impl<S> FromRequestParts<S> for RequireSuperAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = current_admin(parts)
            .await
            .ok_or(AuthRejection::Unauthorized)?;

        if admin.role == AdminRole::SuperAdmin {
            Ok(Self(admin))
        } else {
            Err(AuthRejection::Forbidden)
        }
    }
}
