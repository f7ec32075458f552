//! Contact submission triage repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use auric_core::{ContactSubmission, InquiryType, SubmissionId, SubmissionStatus};

use super::RepositoryError;

/// Partial update for a submission; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct SubmissionUpdate {
    /// New triage status.
    pub status: Option<SubmissionStatus>,
    /// Replacement staff notes.
    pub admin_notes: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct SubmissionRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    inquiry_type: String,
    message: String,
    status: String,
    admin_notes: Option<String>,
    submitted_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
    submitter_ip: Option<String>,
}

impl TryFrom<SubmissionRow> for ContactSubmission {
    type Error = RepositoryError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        let inquiry_type: InquiryType = row
            .inquiry_type
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid inquiry type: {e}")))?;
        let status: SubmissionStatus = row
            .status
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid status: {e}")))?;

        Ok(Self {
            id: SubmissionId::new(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            inquiry_type,
            message: row.message,
            status,
            admin_notes: row.admin_notes,
            submitted_at: row.submitted_at,
            read_at: row.read_at,
            submitter_ip: row.submitter_ip,
        })
    }
}

const SUBMISSION_COLUMNS: &str = r"
    id, name, email, phone, inquiry_type, message, status,
    admin_notes, submitted_at, read_at, submitter_ip
";

/// Repository for staff submission triage.
pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepository<'a> {
    /// Create a new submission repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List submissions, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list(
        &self,
        status: Option<SubmissionStatus>,
    ) -> Result<Vec<ContactSubmission>, RepositoryError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(&format!(
            r"
            SELECT {SUBMISSION_COLUMNS} FROM contact_submission
            WHERE $1::TEXT IS NULL OR status = $1
            ORDER BY submitted_at DESC, id DESC
            "
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Apply a partial update to a submission.
    ///
    /// `read_at` is stamped the first time the status leaves `new` and never
    /// overwritten afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the submission doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: SubmissionId,
        update: &SubmissionUpdate,
    ) -> Result<ContactSubmission, RepositoryError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            r"
            UPDATE contact_submission
            SET status = COALESCE($1, status),
                admin_notes = COALESCE($2, admin_notes),
                read_at = CASE
                    WHEN read_at IS NULL AND COALESCE($1, status) <> 'new' THEN NOW()
                    ELSE read_at
                END
            WHERE id = $3
            RETURNING {SUBMISSION_COLUMNS}
            "
        ))
        .bind(update.status.map(|s| s.as_str()))
        .bind(update.admin_notes.as_deref())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), TryInto::try_into)
    }

    /// Delete a submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the submission doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: SubmissionId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM contact_submission WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
