//! Inquiry notification emails.
//!
//! Sends a plain-text notification over SMTP via lettre whenever a contact
//! form submission lands. Notifications go to the contact email configured
//! in site settings, falling back to the SMTP from-address when staff have
//! not set one. Delivery is best-effort: the submission is already persisted
//! by the time the notification goes out, so send failures are logged and
//! swallowed rather than surfaced to the shopper.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use auric_core::ContactSubmission;

use crate::config::SmtpConfig;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// SMTP mailer for inquiry notifications.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl Mailer {
    /// Create a mailer from SMTP configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the relay hostname is invalid.
    pub fn new(config: &SmtpConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_owned(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }

    /// Send a plain-text notification for a new inquiry.
    ///
    /// `notify_to` is the contact email from site settings; when staff have
    /// not configured one, the notification goes to the from-address's
    /// mailbox instead.
    ///
    /// # Errors
    ///
    /// Returns an error when the message cannot be built or the relay
    /// rejects it.
    pub async fn send_inquiry_notification(
        &self,
        submission: &ContactSubmission,
        notify_to: Option<&str>,
    ) -> Result<(), EmailError> {
        let recipient = notify_recipient(notify_to, &self.from_address);
        let subject = format!(
            "New {} inquiry from {}",
            submission.inquiry_type.as_str(),
            submission.name
        );
        let body = inquiry_body(submission);

        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(recipient
                .parse()
                .map_err(|_| EmailError::InvalidAddress(recipient.to_owned()))?)
            .subject(&subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        self.transport.send(email).await?;

        tracing::info!(submission_id = %submission.id, subject = %subject, "Inquiry notification sent");
        Ok(())
    }
}

/// Pick the notification recipient, skipping blank configured values.
fn notify_recipient<'a>(configured: Option<&'a str>, fallback: &'a str) -> &'a str {
    match configured.map(str::trim) {
        Some(address) if !address.is_empty() => address,
        _ => fallback,
    }
}

fn inquiry_body(submission: &ContactSubmission) -> String {
    let mut body = format!(
        "New contact form submission #{}\n\n\
         Name: {}\n\
         Email: {}\n",
        submission.id, submission.name, submission.email,
    );
    if let Some(phone) = &submission.phone {
        body.push_str(&format!("Phone: {phone}\n"));
    }
    body.push_str(&format!(
        "Inquiry type: {}\n\
         Submitted: {}\n\n\
         {}\n",
        submission.inquiry_type.as_str(),
        submission.submitted_at.to_rfc3339(),
        submission.message,
    ));
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use auric_core::{InquiryType, SubmissionId, SubmissionStatus};
    use chrono::Utc;

    #[test]
    fn test_inquiry_body_includes_contact_details() {
        let submission = ContactSubmission {
            id: SubmissionId::new(7),
            name: "Ada Smith".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: Some("+1 555 0100".to_owned()),
            inquiry_type: InquiryType::CustomDesign,
            message: "Looking for a custom engagement ring.".to_owned(),
            status: SubmissionStatus::New,
            admin_notes: None,
            submitted_at: Utc::now(),
            read_at: None,
            submitter_ip: None,
        };

        let body = inquiry_body(&submission);
        assert!(body.contains("submission #7"));
        assert!(body.contains("Ada Smith"));
        assert!(body.contains("ada@example.com"));
        assert!(body.contains("+1 555 0100"));
        assert!(body.contains("custom_design"));
        assert!(body.contains("custom engagement ring"));
    }

    #[test]
    fn test_notify_recipient_prefers_settings_contact_email() {
        assert_eq!(
            notify_recipient(Some("inbox@auricjewelry.co"), "noreply@auricjewelry.co"),
            "inbox@auricjewelry.co"
        );
        assert_eq!(
            notify_recipient(Some("  "), "noreply@auricjewelry.co"),
            "noreply@auricjewelry.co"
        );
        assert_eq!(
            notify_recipient(None, "noreply@auricjewelry.co"),
            "noreply@auricjewelry.co"
        );
    }

    #[test]
    fn test_inquiry_body_omits_missing_phone() {
        let submission = ContactSubmission {
            id: SubmissionId::new(8),
            name: "Ben".to_owned(),
            email: "ben@example.com".to_owned(),
            phone: None,
            inquiry_type: InquiryType::General,
            message: "Do you ship internationally?".to_owned(),
            status: SubmissionStatus::New,
            admin_notes: None,
            submitted_at: Utc::now(),
            read_at: None,
            submitter_ip: None,
        };

        assert!(!inquiry_body(&submission).contains("Phone:"));
    }
}
