//! Password hashing, strength rules, and the account-lockout policy.
//!
//! Hashing uses Argon2id with the crate's default parameters. The lockout
//! arithmetic is pure so it can be tested without a database: repositories
//! persist whatever [`next_failed_login`] computes.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};

/// Failed attempts that trigger a lockout.
pub const MAX_FAILED_ATTEMPTS: i32 = 5;

/// How long a lockout lasts.
const LOCKOUT_MINUTES: i64 = 15;

/// Minimum password length for staff accounts.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Errors from authentication operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The password failed the strength rules.
    #[error("password too weak: {}", .0.join(", "))]
    WeakPassword(Vec<String>),

    /// Hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a password against a stored hash.
///
/// Unparseable hashes verify as false rather than erroring, so a corrupt
/// hash reads as a failed login.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

/// Check password strength: minimum length plus upper, lower, and digit.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` listing every failed rule.
pub fn validate_password_strength(password: &str) -> Result<(), AuthError> {
    let mut failures = Vec::new();

    if password.len() < MIN_PASSWORD_LENGTH {
        failures.push(format!("at least {MIN_PASSWORD_LENGTH} characters"));
    }
    if !password.chars().any(char::is_uppercase) {
        failures.push("an uppercase letter".to_owned());
    }
    if !password.chars().any(char::is_lowercase) {
        failures.push("a lowercase letter".to_owned());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        failures.push("a digit".to_owned());
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(AuthError::WeakPassword(failures))
    }
}

/// Compute the counter and lockout deadline after a failed login.
///
/// Returns the incremented attempt count and, once the count reaches
/// [`MAX_FAILED_ATTEMPTS`], a lockout deadline `LOCKOUT_MINUTES` from `now`.
#[must_use]
pub fn next_failed_login(
    failed_attempts: i32,
    now: DateTime<Utc>,
) -> (i32, Option<DateTime<Utc>>) {
    let attempts = failed_attempts.saturating_add(1);
    let locked_until = (attempts >= MAX_FAILED_ATTEMPTS)
        .then(|| now + Duration::minutes(LOCKOUT_MINUTES));
    (attempts, locked_until)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("Correct-Horse-7").expect("hashes");
        assert!(verify_password("Correct-Horse-7", &hash));
        assert!(!verify_password("wrong-password-7", &hash));
    }

    #[test]
    fn test_corrupt_hash_verifies_false() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_strength_rules() {
        assert!(validate_password_strength("Velvet-Anvil-42").is_ok());

        let err = validate_password_strength("short").expect_err("weak");
        let AuthError::WeakPassword(failures) = err else {
            panic!("expected WeakPassword");
        };
        // short, no uppercase, no digit
        assert_eq!(failures.len(), 3);

        assert!(validate_password_strength("alllowercase123456").is_err());
        assert!(validate_password_strength("ALLUPPERCASE123456").is_err());
        assert!(validate_password_strength("NoDigitsAtAllHere").is_err());
    }

    #[test]
    fn test_lockout_set_at_threshold() {
        let now = Utc::now();
        let (attempts, locked) = next_failed_login(3, now);
        assert_eq!(attempts, 4);
        assert!(locked.is_none());

        let (attempts, locked) = next_failed_login(4, now);
        assert_eq!(attempts, 5);
        assert_eq!(locked, Some(now + Duration::minutes(15)));
    }

    #[test]
    fn test_lockout_persists_past_threshold() {
        let now = Utc::now();
        let (attempts, locked) = next_failed_login(7, now);
        assert_eq!(attempts, 8);
        assert!(locked.is_some());
    }
}
