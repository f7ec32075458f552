//! Contact submission inserts.
//!
//! The storefront's only write path: recording validated contact-form
//! submissions. Staff triage happens in the admin binary.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use auric_core::{ContactSubmission, InquiryType, SubmissionId, SubmissionStatus};

use super::RepositoryError;

/// Parameters for recording a new contact submission.
#[derive(Debug)]
pub struct NewSubmission {
    /// Visitor's name.
    pub name: String,
    /// Visitor's email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// What the inquiry is about.
    pub inquiry_type: InquiryType,
    /// The message body.
    pub message: String,
    /// Submitter's IP, for abuse handling.
    pub submitter_ip: Option<String>,
}

/// Internal row type for the insert's RETURNING clause.
#[derive(Debug, sqlx::FromRow)]
struct SubmissionRow {
    id: i32,
    submitted_at: DateTime<Utc>,
}

/// Record a new contact submission with status `new`.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn create_submission(
    pool: &PgPool,
    params: NewSubmission,
) -> Result<ContactSubmission, RepositoryError> {
    let row = sqlx::query_as::<_, SubmissionRow>(
        r"
        INSERT INTO contact_submission
            (name, email, phone, inquiry_type, message, status, submitter_ip)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, submitted_at
        ",
    )
    .bind(&params.name)
    .bind(&params.email)
    .bind(&params.phone)
    .bind(params.inquiry_type.as_str())
    .bind(&params.message)
    .bind(SubmissionStatus::New.as_str())
    .bind(&params.submitter_ip)
    .fetch_one(pool)
    .await?;

    Ok(ContactSubmission {
        id: SubmissionId::new(row.id),
        name: params.name,
        email: params.email,
        phone: params.phone,
        inquiry_type: params.inquiry_type,
        message: params.message,
        status: SubmissionStatus::New,
        admin_notes: None,
        submitted_at: row.submitted_at,
        read_at: None,
        submitter_ip: params.submitter_ip,
    })
}
