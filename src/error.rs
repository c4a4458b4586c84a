//! Application error type returned by HTTP handlers.
//!
//! Every failure of a contact submission is one of three kinds, each mapped to
//! a fixed status code and rendered as `{ "error": "<message>" }`:
//!
//! | Kind            | Status | Message                         |
//! |-----------------|--------|---------------------------------|
//! | `validation`    | 400    | specific, caller-correctable    |
//! | `rate_limited`  | 429    | generic "try again later"       |
//! | `relay_failure` | 500    | generic, never the relay error  |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Message returned when the request body cannot be decoded at all.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Message returned when a client exceeds its submission quota.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";

/// Message returned for every relay failure.
pub const RELAY_FAILURE_MESSAGE: &str = "Failed to send message";

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Validation { message: String },
    RateLimited { message: String },
    RelayFailure { message: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn rate_limited() -> Self {
        Self::RateLimited {
            message: RATE_LIMITED_MESSAGE.to_string(),
        }
    }

    /// Relay failures always carry the generic message; details stay in the logs.
    pub fn relay_failure() -> Self {
        Self::RelayFailure {
            message: RELAY_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Stable machine-readable kind, also used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation",
            AppError::RateLimited { .. } => "rate_limited",
            AppError::RelayFailure { .. } => "relay_failure",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::RelayFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message }
            | AppError::RateLimited { message }
            | AppError::RelayFailure { message } => message,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: match self {
                AppError::Validation { message }
                | AppError::RateLimited { message }
                | AppError::RelayFailure { message } => message,
            },
        };

        (status, Json(body)).into_response()
    }
}
