//! Contact submission triage.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use auric_core::{ContactSubmission, SubmissionId, SubmissionStatus};

use crate::db::submissions::{SubmissionRepository, SubmissionUpdate};
use crate::error::Result;
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

/// Query parameters for the submission list.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Only return submissions in this status.
    #[serde(default)]
    pub status: Option<SubmissionStatus>,
}

/// PATCH body; omitted fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdatePayload {
    /// New triage status.
    #[serde(default)]
    pub status: Option<SubmissionStatus>,
    /// Replacement staff notes.
    #[serde(default)]
    pub admin_notes: Option<String>,
}

/// `GET /api/submissions` - newest first, optional `?status=` filter.
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ContactSubmission>>> {
    let submissions = SubmissionRepository::new(state.pool())
        .list(params.status)
        .await?;
    Ok(Json(submissions))
}

/// `PATCH /api/submissions/{id}` - update status and/or notes.
///
/// `read_at` is stamped the first time the status leaves `new`.
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePayload>,
) -> Result<Json<ContactSubmission>> {
    let submission = SubmissionRepository::new(state.pool())
        .update(
            SubmissionId::new(id),
            &SubmissionUpdate {
                status: payload.status,
                admin_notes: payload.admin_notes,
            },
        )
        .await?;
    Ok(Json(submission))
}

/// `DELETE /api/submissions/{id}` - delete a submission.
pub async fn destroy(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    SubmissionRepository::new(state.pool())
        .delete(SubmissionId::new(id))
        .await?;

    tracing::info!(submission_id = id, "submission deleted");
    Ok(StatusCode::NO_CONTENT)
}
