//! Field rules for contact submissions.
//!
//! These validators are the single source of truth for both the HTTP handler
//! ([`crate::application::services::ContactService`]) and the client-side form
//! controller ([`crate::form::ContactForm`]). They are pure and total over
//! string input: invalid input yields a [`FieldError`], never a panic.
//!
//! Lengths are measured in characters after trimming surrounding whitespace.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum length of a sender name.
pub const NAME_MIN_LENGTH: usize = 2;

/// Minimum length of a message body.
pub const MESSAGE_MIN_LENGTH: usize = 10;

/// Maximum length of a message body.
pub const MESSAGE_MAX_LENGTH: usize = 1500;

/// `local@domain.tld`, no whitespace, exactly one `@` between the parts.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A user-facing reason why a single field is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
    #[error("Message must be at most 1500 characters")]
    MessageTooLong,
}

/// Validates a sender name.
pub fn validate_name(value: &str) -> Result<(), FieldError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(FieldError::NameRequired);
    }

    if trimmed.chars().count() < NAME_MIN_LENGTH {
        return Err(FieldError::NameTooShort);
    }

    Ok(())
}

/// Validates an email address against the `local@domain.tld` shape.
///
/// The value is matched as given; surrounding whitespace makes it invalid.
pub fn validate_email(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::EmailRequired);
    }

    if !EMAIL_REGEX.is_match(value) {
        return Err(FieldError::EmailInvalid);
    }

    Ok(())
}

/// Validates a message body.
pub fn validate_message(value: &str) -> Result<(), FieldError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(FieldError::MessageRequired);
    }

    let length = trimmed.chars().count();

    if length < MESSAGE_MIN_LENGTH {
        return Err(FieldError::MessageTooShort);
    }

    if length > MESSAGE_MAX_LENGTH {
        return Err(FieldError::MessageTooLong);
    }

    Ok(())
}
