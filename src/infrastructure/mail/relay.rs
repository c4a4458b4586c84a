//! Mail relay trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::OutboundMessage;

/// Errors raised while handing a message to the relay.
///
/// The text of these errors may contain hostnames, addresses or server
/// responses. It is logged for operators and never returned to callers.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid mailbox address {address:?}: {reason}")]
    Address { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("relay rejected the message: {0}")]
    Rejected(String),

    #[error("relay did not answer within {0:?}")]
    Timeout(std::time::Duration),
}

/// Delivers rendered contact notifications.
///
/// A single dispatch either succeeds or fails; implementations do not retry
/// and do not deduplicate, so dispatching the same message twice sends it twice.
///
/// # Implementations
///
/// - [`crate::infrastructure::mail::SmtpRelay`] - Authenticated SMTP via lettre
/// - [`crate::infrastructure::mail::LogRelay`] - Logs instead of sending (development)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError`] if the message cannot be built or delivered.
    async fn dispatch(&self, message: OutboundMessage) -> Result<(), RelayError>;

    /// Checks if the relay is reachable.
    async fn health_check(&self) -> bool;
}
