//! Contact form route handler.
//!
//! Persists inquiries from anonymous visitors, rate limited per client IP,
//! and fires a best-effort email notification to staff.

use axum::{Json, extract::State, http::StatusCode, http::request::Parts};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use auric_core::{Email, InquiryType};

use crate::db::submissions::{self, NewSubmission};
use crate::error::{AppError, Result};
use crate::middleware::rate_limit::{RateLimitDecision, client_ip};
use crate::state::AppState;

/// Maximum accepted message length, in characters.
const MAX_MESSAGE_LENGTH: usize = 5000;
/// Maximum accepted name length, in characters.
const MAX_NAME_LENGTH: usize = 200;

/// Contact form payload.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub inquiry_type: InquiryType,
    pub message: String,
}

/// Response for a stored submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub submission_id: i32,
}

/// Submit a contact inquiry.
///
/// POST /api/contact
///
/// The submission is persisted before any notification goes out, so a
/// failing SMTP relay never loses an inquiry. Returns 429 when the client
/// IP has exhausted its rate-limit window.
#[instrument(skip(state, parts, form), fields(inquiry_type = %form.inquiry_type))]
pub async fn submit(
    State(state): State<AppState>,
    parts: Parts,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<ContactResponse>)> {
    let email = Email::parse(&form.email)
        .map_err(|_| AppError::BadRequest("Please enter a valid email address.".to_owned()))?;

    let name = form.name.trim();
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(AppError::BadRequest("Name is required.".to_owned()));
    }

    let message = form.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Message is required.".to_owned()));
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Message must be at most {MAX_MESSAGE_LENGTH} characters."
        )));
    }

    let ip = client_ip(&parts);
    let key = ip.map_or_else(|| "unknown".to_owned(), |ip| ip.to_string());
    if state.contact_limiter().check(&key) == RateLimitDecision::Limited {
        tracing::warn!(client_ip = %key, "Contact form rate limited");
        return Err(AppError::RateLimited);
    }

    let submission = submissions::create_submission(
        state.pool(),
        NewSubmission {
            name: name.to_owned(),
            email: email.into_inner(),
            phone: form
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(ToOwned::to_owned),
            inquiry_type: form.inquiry_type,
            message: message.to_owned(),
            submitter_ip: ip.map(|ip| ip.to_string()),
        },
    )
    .await?;

    let submission_id = submission.id;
    tracing::info!(%submission_id, "Contact submission stored");

    // Notification delivery is best-effort and must not delay the response.
    if let Some(mailer) = state.mailer() {
        let mailer = mailer.clone();
        let state = state.clone();
        tokio::spawn(async move {
            let contact_email = match state.site_settings().await {
                Ok(settings) => settings.contact_email,
                Err(error) => {
                    tracing::warn!(%error, "Falling back to default notification recipient");
                    None
                }
            };
            if let Err(error) = mailer
                .send_inquiry_notification(&submission, contact_email.as_deref())
                .await
            {
                tracing::error!(%error, %submission_id, "Inquiry notification failed");
            }
        });
    }

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            submission_id: submission_id.as_i32(),
        }),
    ))
}
