//! Staff account management commands.
//!
//! ```bash
//! auric admin create -e staff@auricjewelry.co -n "Ada" -r admin
//! ```
//!
//! The password comes from `--password` or the `AURIC_ADMIN_PASSWORD`
//! environment variable (preferred, so it stays out of shell history).
//! It must pass the same strength rules the API enforces.

use std::str::FromStr;

use auric_core::{AdminRole, Email};

use auric_admin::db::admins::AdminRepository;
use auric_admin::services::auth::{hash_password, validate_password_strength};

use super::{CliError, connect};

/// Create a new staff account with a password credential.
pub async fn create_user(
    email: &str,
    name: &str,
    role: &str,
    password: Option<&str>,
) -> Result<(), CliError> {
    let email =
        Email::parse(email).map_err(|e| CliError::InvalidInput(format!("invalid email: {e}")))?;
    let role = AdminRole::from_str(role)
        .map_err(|e| CliError::InvalidInput(format!("invalid role: {e}")))?;

    let password = match password {
        Some(p) => p.to_owned(),
        None => std::env::var("AURIC_ADMIN_PASSWORD")
            .map_err(|_| CliError::MissingEnvVar("AURIC_ADMIN_PASSWORD"))?,
    };
    validate_password_strength(&password).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    let hash =
        hash_password(&password).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let pool = connect().await?;
    let admin = AdminRepository::new(&pool)
        .create(&email, name, role, Some(&hash))
        .await?;

    tracing::info!(
        admin_id = %admin.id,
        email = %admin.email,
        role = %admin.role,
        "staff account created"
    );
    Ok(())
}
