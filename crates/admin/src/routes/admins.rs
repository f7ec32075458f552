//! Staff account management, restricted to super admins.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use auric_core::{AdminId, AdminRole, Email};

use crate::db::admins::AdminRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireSuperAdmin;
use crate::models::Admin;
use crate::services::auth::{hash_password, validate_password_strength};
use crate::state::AppState;

/// Staff account projection. The stored password hash never leaves the
/// server, so responses carry a `has_password` flag instead.
#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub id: AdminId,
    pub email: String,
    pub name: String,
    pub role: AdminRole,
    pub has_password: bool,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email.into_inner(),
            name: admin.name,
            role: admin.role,
            has_password: admin.password_hash.is_some(),
            locked_until: admin.locked_until,
            last_login_at: admin.last_login_at,
            created_at: admin.created_at,
        }
    }
}

/// Payload for creating a staff account.
#[derive(Debug, Deserialize)]
pub struct CreateAdminPayload {
    pub email: String,
    pub name: String,
    pub role: AdminRole,
    /// Initial password. Omit for federated-only accounts.
    #[serde(default)]
    pub password: Option<String>,
}

/// `GET /api/admins` - list all staff accounts.
pub async fn index(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminResponse>>> {
    let admins = AdminRepository::new(state.pool()).list_all().await?;
    Ok(Json(admins.into_iter().map(Into::into).collect()))
}

/// `POST /api/admins` - create a staff account.
pub async fn create(
    RequireSuperAdmin(actor): RequireSuperAdmin,
    State(state): State<AppState>,
    Json(payload): Json<CreateAdminPayload>,
) -> Result<(StatusCode, Json<AdminResponse>)> {
    let email = Email::parse(&payload.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }

    let password_hash = match payload.password.as_deref() {
        Some(password) => {
            validate_password_strength(password)
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            Some(hash_password(password).map_err(|e| AppError::Internal(e.to_string()))?)
        }
        None => None,
    };

    let admin = AdminRepository::new(state.pool())
        .create(&email, name, payload.role, password_hash.as_deref())
        .await?;

    tracing::info!(
        actor = %actor.email,
        admin_id = %admin.id,
        role = %admin.role,
        "staff account created"
    );
    Ok((StatusCode::CREATED, Json(admin.into())))
}

/// `DELETE /api/admins/{id}` - remove a staff account.
///
/// Super admins cannot delete their own account, so the last one standing
/// can't lock everybody out.
pub async fn destroy(
    RequireSuperAdmin(actor): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let target = AdminId::new(id);
    if is_self_deletion(actor.id, target) {
        return Err(AppError::BadRequest(
            "cannot delete your own account".to_owned(),
        ));
    }

    let repo = AdminRepository::new(state.pool());
    let admin = repo
        .get_by_id(target)
        .await?
        .ok_or_else(|| AppError::NotFound("staff account not found".to_owned()))?;
    repo.delete(target).await?;

    tracing::info!(
        actor = %actor.email,
        deleted_email = %admin.email,
        "staff account deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

fn is_self_deletion(actor: AdminId, target: AdminId) -> bool {
    actor == target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_deletion_is_detected() {
        assert!(is_self_deletion(AdminId::new(1), AdminId::new(1)));
        assert!(!is_self_deletion(AdminId::new(1), AdminId::new(2)));
    }

    #[test]
    fn test_response_never_carries_the_hash() {
        let admin = Admin {
            id: AdminId::new(3),
            email: Email::parse("staff@auricjewelry.co").expect("valid email"),
            name: "Staff".to_owned(),
            role: AdminRole::Admin,
            password_hash: Some("$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_owned()),
            oauth_subject: None,
            failed_login_attempts: 0,
            locked_until: None,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json =
            serde_json::to_string(&AdminResponse::from(admin)).expect("serializable response");
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"has_password\":true"));
    }
}
