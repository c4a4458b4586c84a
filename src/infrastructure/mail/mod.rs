//! Outbound delivery of contact notifications.
//!
//! Provides a [`MailRelay`] trait with two implementations:
//! - [`SmtpRelay`] - Production relay over authenticated SMTP
//! - [`LogRelay`] - Development relay that only logs the envelope

mod log_relay;
mod relay;
mod smtp_relay;

pub use log_relay::LogRelay;
pub use relay::{MailRelay, RelayError};
pub use smtp_relay::SmtpRelay;

#[cfg(test)]
pub use relay::MockMailRelay;
