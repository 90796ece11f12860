//! Outbound email delivery.
//!
//! Services build an [`OutgoingEmail`] and hand it to whatever [`Mailer`]
//! lives in `AppState`. Production uses Resend; tests plug in a recorder.

use async_trait::async_trait;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MailError {
    #[error("no recipients")]
    NoRecipients,
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// A plain-text email with an optional HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

/// [`Mailer`] backed by the Resend HTTP API.
pub struct ResendMailer {
    client: Resend,
    from: String,
}

impl ResendMailer {
    #[must_use]
    pub fn new(api_key: &str, from: impl Into<String>) -> Self {
        Self { client: Resend::new(api_key), from: from.into() }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        if email.to.is_empty() {
            return Err(MailError::NoRecipients);
        }
        let mut options = CreateEmailBaseOptions::new(&self.from, email.to, &email.subject).with_text(&email.text);
        if let Some(html) = &email.html {
            options = options.with_html(html);
        }
        self.client
            .emails
            .send(options)
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?;
        Ok(())
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
