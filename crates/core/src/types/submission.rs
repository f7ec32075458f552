//! Contact submission domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::SubmissionId;
use super::status::{InquiryType, SubmissionStatus};

/// An inbound inquiry from the storefront contact form.
///
/// Created by anonymous visitors (rate limited); staff move the status
/// through `new` → `read` → `replied` and may attach notes. `read_at` is
/// stamped the first time the status leaves `new` and never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    /// Database primary key.
    pub id: SubmissionId,
    /// Visitor's name.
    pub name: String,
    /// Visitor's email address, as entered (not an account).
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// What the inquiry is about.
    pub inquiry_type: InquiryType,
    /// The message body.
    pub message: String,
    /// Staff triage status.
    pub status: SubmissionStatus,
    /// Internal staff notes, never shown publicly.
    pub admin_notes: Option<String>,
    /// When the visitor submitted the form.
    pub submitted_at: DateTime<Utc>,
    /// When staff first read the submission.
    pub read_at: Option<DateTime<Utc>>,
    /// Submitter's IP, recorded for abuse handling.
    pub submitter_ip: Option<String>,
}
