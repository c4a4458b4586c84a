//! The email handed to the mail relay for one accepted submission.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::domain::entities::ContactRequest;

/// Display name used in the `From` header.
pub const SENDER_DISPLAY_NAME: &str = "Portfolio Contact";

#[derive(Template)]
#[template(path = "contact_email.html")]
struct HtmlBody<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    received_at: &'a str,
}

#[derive(Template)]
#[template(path = "contact_email.txt")]
struct TextBody<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    received_at: &'a str,
}

/// A fully rendered notification email.
///
/// The submitter's address goes into `reply_to` so that answering the
/// notification replies to the visitor directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipient: String,
    pub reply_to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub submitted_at: DateTime<Utc>,
}

impl OutboundMessage {
    /// Renders the notification for `request`, addressed to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns an error if a body template fails to render.
    pub fn compose(
        request: &ContactRequest,
        recipient: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, askama::Error> {
        let received_at = submitted_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();

        let html_body = HtmlBody {
            name: request.name(),
            email: request.email(),
            message: request.message(),
            received_at: &received_at,
        }
        .render()?;

        let text_body = TextBody {
            name: request.name(),
            email: request.email(),
            message: request.message(),
            received_at: &received_at,
        }
        .render()?;

        Ok(Self {
            recipient: recipient.to_string(),
            reply_to: request.email().to_string(),
            subject: format!("✨ New Portfolio Contact from {}", request.name()),
            html_body,
            text_body,
            submitted_at,
        })
    }
}
