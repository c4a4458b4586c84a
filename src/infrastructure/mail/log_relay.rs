//! Mail relay that only logs, for local development.

use super::relay::{MailRelay, RelayError};
use crate::domain::entities::OutboundMessage;
use async_trait::async_trait;
use tracing::{info, warn};

/// A relay that records each message in the log instead of sending it.
///
/// Selected with `MAIL_RELAY=log`. Message bodies are not logged, only the
/// envelope, so running it against real traffic does not spill visitor text
/// into log storage.
pub struct LogRelay;

impl LogRelay {
    pub fn new() -> Self {
        warn!("Using LogRelay: contact messages will NOT be delivered");
        Self
    }
}

impl Default for LogRelay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailRelay for LogRelay {
    async fn dispatch(&self, message: OutboundMessage) -> Result<(), RelayError> {
        info!(
            recipient = %message.recipient,
            reply_to = %message.reply_to,
            subject = %message.subject,
            submitted_at = %message.submitted_at,
            "Contact message (log relay, not delivered)"
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
