//! Domain models for the admin API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use uuid::Uuid;

use auric_core::{AdminId, AdminRole, ChangeType, Email, ProductHistoryId, ProductId};

/// Session keys used by the admin API.
pub mod session_keys {
    /// Session key for the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

/// A staff account with back-office access.
///
/// The password hash never leaves this crate; API responses use
/// [`CurrentAdmin`] instead.
#[derive(Debug, Clone)]
pub struct Admin {
    /// Database primary key.
    pub id: AdminId,
    /// Unique lowercase login email.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Authorization role.
    pub role: AdminRole,
    /// Argon2id password hash; absent for federated-only accounts.
    pub password_hash: Option<String>,
    /// Federated identity subject; absent for password-only accounts.
    pub oauth_subject: Option<String>,
    /// Consecutive failed login attempts since the last success.
    pub failed_login_attempts: i32,
    /// When set and in the future, logins are rejected outright.
    pub locked_until: Option<DateTime<Utc>>,
    /// Last successful login.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Whether the account is currently locked out.
    #[must_use]
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }
}

/// The logged-in admin, as stored in the session and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Database primary key.
    pub id: AdminId,
    /// Login email.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Authorization role.
    pub role: AdminRole,
}

impl From<&Admin> for CurrentAdmin {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email.clone(),
            name: admin.name.clone(),
            role: admin.role,
        }
    }
}

/// One entry in a product's append-only audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductHistoryEntry {
    /// Database primary key.
    pub id: ProductHistoryId,
    /// Primary key of the product at the time of the change.
    pub product_id: ProductId,
    /// The product's stable external ID; survives product deletion.
    pub product_external_id: Uuid,
    /// The product version this entry recorded.
    pub version: i32,
    /// Full product document as of this change.
    pub snapshot: serde_json::Value,
    /// Email of the staff member who made the change.
    pub changed_by: String,
    /// What kind of mutation this was.
    pub change_type: ChangeType,
    /// When the change was made.
    pub changed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn admin(locked_until: Option<DateTime<Utc>>) -> Admin {
        Admin {
            id: AdminId::new(1),
            email: Email::parse("staff@auricjewelry.co").expect("valid email"),
            name: "Staff".to_owned(),
            role: AdminRole::Admin,
            password_hash: Some("$argon2id$stub".to_owned()),
            oauth_subject: None,
            failed_login_attempts: 0,
            locked_until,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_locked_while_lockout_in_future() {
        let now = Utc::now();
        assert!(admin(Some(now + Duration::minutes(5))).is_locked(now));
    }

    #[test]
    fn test_expired_lockout_is_not_locked() {
        let now = Utc::now();
        assert!(!admin(Some(now - Duration::seconds(1))).is_locked(now));
        assert!(!admin(None).is_locked(now));
    }
}
