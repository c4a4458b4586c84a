//! Contact submission entities: the raw draft and the validated request.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::validation::{FieldError, validate_email, validate_message, validate_name};
use crate::error::AppError;

/// Message returned when a field is absent or blank.
pub const FIELDS_REQUIRED_MESSAGE: &str = "All fields are required";

/// Message returned when the email fails the server-side format check.
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address";

/// Field order used when reporting the first validation failure.
const FIELD_ORDER: [&str; 3] = ["name", "email", "message"];

/// A contact submission as it arrives on the wire.
///
/// Fields are optional so that a missing field can be reported as such
/// instead of as a decoding failure. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }

    /// Turns the draft into a [`ContactRequest`], checking in order:
    ///
    /// 1. every field is present and not blank
    /// 2. the email has a valid shape
    /// 3. every field passes its full rule set
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] carrying the first failure's message.
    pub fn into_request(self) -> Result<ContactRequest, AppError> {
        let (Some(name), Some(email), Some(message)) = (self.name, self.email, self.message)
        else {
            return Err(AppError::validation(FIELDS_REQUIRED_MESSAGE));
        };

        if [&name, &email, &message]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err(AppError::validation(FIELDS_REQUIRED_MESSAGE));
        }

        if validate_email(&email).is_err() {
            return Err(AppError::validation(INVALID_EMAIL_MESSAGE));
        }

        let request = ContactRequest {
            name,
            email,
            message,
        };
        request.validate().map_err(first_failure)?;

        Ok(request)
    }
}

/// A contact submission that passed every field rule.
///
/// Only constructed through [`ContactDraft::into_request`], so holding one is
/// proof that the submission may be forwarded to the mail relay.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ContactRequest {
    #[validate(custom(function = "name_rule"))]
    name: String,
    #[validate(custom(function = "email_rule"))]
    email: String,
    #[validate(custom(function = "message_rule"))]
    message: String,
}

impl ContactRequest {
    /// Sender name with surrounding whitespace removed.
    pub fn name(&self) -> &str {
        self.name.trim()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Message body with surrounding whitespace removed.
    pub fn message(&self) -> &str {
        self.message.trim()
    }
}

fn name_rule(value: &str) -> Result<(), ValidationError> {
    validate_name(value).map_err(|e| to_validation_error("name", e))
}

fn email_rule(value: &str) -> Result<(), ValidationError> {
    validate_email(value).map_err(|e| to_validation_error("email", e))
}

fn message_rule(value: &str) -> Result<(), ValidationError> {
    validate_message(value).map_err(|e| to_validation_error("message", e))
}

fn to_validation_error(code: &'static str, error: FieldError) -> ValidationError {
    ValidationError::new(code).with_message(error.to_string().into())
}

/// Picks the message of the first failing field in form order.
fn first_failure(errors: ValidationErrors) -> AppError {
    let field_errors = errors.field_errors();

    let message = FIELD_ORDER
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| FIELDS_REQUIRED_MESSAGE.to_string());

    AppError::validation(message)
}
