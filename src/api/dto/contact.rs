//! DTOs for the contact submission endpoint.
//!
//! The request body is [`crate::domain::entities::ContactDraft`]. Failures
//! are serialized as [`crate::error::ErrorBody`].

use serde::{Deserialize, Serialize};

/// Body of a successful submission.
///
/// ```json
/// { "success": true, "message": "Email sent successfully" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
}

impl SendEmailResponse {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
