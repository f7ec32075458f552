//! Session login, logout, and introspection.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use auric_core::Email;

use crate::db::admins::AdminRepository;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::RequireAdminAuth;
use crate::models::{CurrentAdmin, session_keys};
use crate::services::auth::{
    hash_password, next_failed_login, validate_password_strength, verify_password,
};
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Staff login email.
    pub email: String,
    /// Plain-text password, verified against the stored hash.
    pub password: String,
}

/// `POST /auth/login` - authenticate and establish a session.
///
/// Lockout is checked before any password verification, so a locked
/// account is rejected even with the correct password. Failed attempts
/// are counted; unknown emails get the same response as bad passwords.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<CurrentAdmin>> {
    let email = Email::parse(&payload.email)
        .map_err(|_| AppError::Unauthorized("invalid credentials".to_owned()))?;

    let repo = AdminRepository::new(state.pool());
    let Some(admin) = repo.get_by_email(&email).await? else {
        return Err(AppError::Unauthorized("invalid credentials".to_owned()));
    };

    let now = Utc::now();
    if admin.is_locked(now) {
        tracing::warn!(admin_id = %admin.id, "login rejected: account locked");
        return Err(AppError::Unauthorized(
            "account temporarily locked".to_owned(),
        ));
    }

    let verified = admin
        .password_hash
        .as_deref()
        .is_some_and(|hash| verify_password(&payload.password, hash));

    if !verified {
        let (attempts, locked_until) = next_failed_login(admin.failed_login_attempts, now);
        repo.record_failed_login(admin.id, attempts, locked_until)
            .await?;
        tracing::warn!(
            admin_id = %admin.id,
            failed_attempts = attempts,
            locked = locked_until.is_some(),
            "login failed"
        );
        return Err(AppError::Unauthorized("invalid credentials".to_owned()));
    }

    repo.record_successful_login(admin.id).await?;

    let current = CurrentAdmin::from(&admin);
    session
        .insert(session_keys::CURRENT_ADMIN, current.clone())
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))?;

    set_sentry_user(admin.id.as_i32(), Some(admin.email.as_str()));
    tracing::info!(admin_id = %admin.id, "admin logged in");

    Ok(Json(current))
}

/// `POST /auth/logout` - destroy the current session.
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    clear_sentry_user();

    Ok(Json(serde_json::json!({ "success": true })))
}

/// `GET /auth/me` - the logged-in admin for this session.
pub async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> Json<CurrentAdmin> {
    Json(admin)
}

/// Change-password request body.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    /// The account's current password, re-verified before any change.
    pub current_password: String,
    /// The replacement, checked against the strength rules.
    pub new_password: String,
}

/// `POST /auth/password` - change the logged-in admin's own password.
///
/// Federated-only accounts have no password to change and are rejected.
pub async fn change_password(
    State(state): State<AppState>,
    RequireAdminAuth(current): RequireAdminAuth,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>> {
    let repo = AdminRepository::new(state.pool());
    let admin = repo
        .get_by_id(current.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("account no longer exists".to_owned()))?;

    let Some(hash) = admin.password_hash.as_deref() else {
        return Err(AppError::BadRequest(
            "account uses federated login and has no password".to_owned(),
        ));
    };
    if !verify_password(&payload.current_password, hash) {
        return Err(AppError::Unauthorized(
            "current password is incorrect".to_owned(),
        ));
    }

    validate_password_strength(&payload.new_password)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let new_hash =
        hash_password(&payload.new_password).map_err(|e| AppError::Internal(e.to_string()))?;
    repo.update_password_hash(admin.id, &new_hash).await?;

    tracing::info!(admin_id = %admin.id, "password changed");
    Ok(Json(serde_json::json!({ "success": true })))
}
