//! SMTP mail relay built on lettre.

use super::relay::{MailRelay, RelayError};
use crate::config::SmtpSettings;
use crate::domain::entities::OutboundMessage;
use crate::domain::entities::outbound_message::SENDER_DISPLAY_NAME;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use tracing::{debug, info, warn};

/// Authenticated SMTP relay.
///
/// The transport keeps a connection pool, so one instance is shared by every
/// request. Credentials come from [`SmtpSettings`] and are never logged.
#[derive(Clone)]
pub struct SmtpRelay {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelay {
    /// Builds the transport and the `From` mailbox.
    ///
    /// Uses `settings.url` when present, otherwise an implicit-TLS relay to
    /// `settings.host:settings.port` with the configured credentials. No
    /// connection is opened until the first dispatch or health check.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError`] if the URL or host is unusable, or `from` is not
    /// a valid address.
    pub fn new(settings: &SmtpSettings, from: &str) -> Result<Self, RelayError> {
        let transport = match &settings.url {
            Some(url) => AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build(),
            None => {
                let mut builder =
                    AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?.port(settings.port);

                if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
                    builder =
                        builder.credentials(Credentials::new(username.clone(), password.clone()));
                }

                builder.build()
            }
        };

        let from = Mailbox::new(
            Some(SENDER_DISPLAY_NAME.to_string()),
            from.parse().map_err(|e: lettre::address::AddressError| {
                RelayError::Address {
                    address: from.to_string(),
                    reason: e.to_string(),
                }
            })?,
        );

        info!("SMTP relay configured, sending as {}", from);

        Ok(Self { from, transport })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, RelayError> {
    address.parse().map_err(|e: lettre::address::AddressError| RelayError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

impl SmtpRelay {
    /// Builds the MIME message for `message`.
    ///
    /// Some addresses accepted by the contact form are not valid RFC 5322
    /// mailboxes. Those are sent without a `Reply-To` header; the submitter's
    /// address is still part of both bodies.
    fn build_email(&self, message: OutboundMessage) -> Result<Message, RelayError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&message.recipient)?)
            .subject(message.subject);

        match parse_mailbox(&message.reply_to) {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(e) => warn!("Sending without Reply-To header: {}", e),
        }

        Ok(builder.multipart(MultiPart::alternative_plain_html(
            message.text_body,
            message.html_body,
        ))?)
    }
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn dispatch(&self, message: OutboundMessage) -> Result<(), RelayError> {
        let email = self.build_email(message)?;

        let response = self.transport.send(email).await?;

        if !response.is_positive() {
            return Err(RelayError::Rejected(response.code().to_string()));
        }

        debug!("SMTP relay accepted message ({})", response.code());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        match self.transport.test_connection().await {
            Ok(connected) => connected,
            Err(e) => {
                warn!("SMTP health check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            url: None,
            host: "smtp.example.com".to_string(),
            port: 465,
            username: Some("owner@example.com".to_string()),
            password: Some("app-password".to_string()),
        }
    }

    #[tokio::test]
    async fn test_new_from_components() {
        let relay = SmtpRelay::new(&settings(), "owner@example.com").unwrap();
        assert_eq!(relay.from.email.to_string(), "owner@example.com");
        assert_eq!(relay.from.name.as_deref(), Some("Portfolio Contact"));
    }

    #[tokio::test]
    async fn test_new_from_url() {
        let mut settings = settings();
        settings.url = Some("smtp://localhost:2525".to_string());

        assert!(SmtpRelay::new(&settings, "owner@example.com").is_ok());
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_sender() {
        let result = SmtpRelay::new(&settings(), "not an address");
        assert!(matches!(result, Err(RelayError::Address { .. })));
    }

    fn outbound(reply_to: &str) -> OutboundMessage {
        let request = crate::domain::entities::ContactDraft::new(
            "Jane Doe",
            reply_to,
            "Let's talk about the new project opportunity.",
        )
        .into_request()
        .unwrap();

        OutboundMessage::compose(&request, "owner@example.com", chrono::Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_build_email_sets_reply_to() {
        let relay = SmtpRelay::new(&settings(), "owner@example.com").unwrap();

        let email = relay.build_email(outbound("jane@example.com")).unwrap();

        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(raw.contains("Reply-To: jane@example.com"));
    }

    #[tokio::test]
    async fn test_build_email_skips_unparseable_reply_to() {
        let relay = SmtpRelay::new(&settings(), "owner@example.com").unwrap();

        for address in [
            "a,b@example.com",
            "jane@ex..com",
            "j(a)ne@example.com",
            "<jane>@example.com",
        ] {
            let email = relay.build_email(outbound(address)).unwrap();

            let raw = String::from_utf8(email.formatted()).unwrap();
            assert!(!raw.contains("Reply-To:"), "{address}");
            assert!(raw.contains("To: owner@example.com"));
        }
    }

    #[test]
    fn test_parse_mailbox() {
        assert!(parse_mailbox("jane@example.com").is_ok());
        assert!(matches!(
            parse_mailbox("jane"),
            Err(RelayError::Address { .. })
        ));
    }
}
