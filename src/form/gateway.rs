//! Transport between the form controller and the submission endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::api::dto::contact::SendEmailResponse;
use crate::api::dto::health::HealthResponse;
use crate::domain::entities::ContactDraft;
use crate::error::{ErrorBody, RELAY_FAILURE_MESSAGE};

/// Path of the submission endpoint relative to the server base URL.
pub const SEND_EMAIL_PATH: &str = "/api/send-email";

/// Path of the health endpoint relative to the server base URL.
pub const HEALTH_PATH: &str = "/health";

/// Errors that prevent a response from being received at all.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// What the server answered to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Status below 400.
    Sent { message: String },
    /// Status 400 or above, with the message to show the user.
    Rejected { status: u16, message: String },
}

/// Sends a draft to the submission endpoint.
///
/// Implementations issue exactly one request per call and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitGateway: Send + Sync {
    /// # Errors
    ///
    /// Returns [`GatewayError`] when no response was received.
    async fn send(&self, draft: ContactDraft) -> Result<SubmitOutcome, GatewayError>;
}

/// Maps a raw response to a [`SubmitOutcome`].
///
/// A failure shows the server's `error` text verbatim, or
/// `"Failed to send message"` when the body is not the expected JSON.
pub fn interpret_response(status: u16, body: &[u8]) -> SubmitOutcome {
    if status < 400 {
        let message = serde_json::from_slice::<SendEmailResponse>(body)
            .map(|r| r.message)
            .unwrap_or_default();
        return SubmitOutcome::Sent { message };
    }

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| RELAY_FAILURE_MESSAGE.to_string());

    SubmitOutcome::Rejected { status, message }
}

/// [`SubmitGateway`] over HTTP with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Creates a gateway for the server at `base_url` (e.g. `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Client`] if the TLS backend cannot be initialized.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("contact-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GatewayError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the server health report.
    ///
    /// A degraded server answers 503 with the same body, so the status code
    /// is not treated as an error here.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if the request fails or the body is
    /// not a health report.
    pub async fn health(&self) -> Result<(StatusCode, HealthResponse), GatewayError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, HEALTH_PATH))
            .send()
            .await?;

        let status = response.status();
        let report = response.json::<HealthResponse>().await?;

        Ok((status, report))
    }
}

#[async_trait]
impl SubmitGateway for HttpGateway {
    async fn send(&self, draft: ContactDraft) -> Result<SubmitOutcome, GatewayError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, SEND_EMAIL_PATH))
            .json(&draft)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::debug!("Submission answered with {}", status);

        Ok(interpret_response(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body() {
        let outcome = interpret_response(
            200,
            br#"{"success":true,"message":"Email sent successfully"}"#,
        );
        assert_eq!(
            outcome,
            SubmitOutcome::Sent {
                message: "Email sent successfully".to_string()
            }
        );
    }

    #[test]
    fn test_error_message_is_verbatim() {
        let outcome = interpret_response(
            429,
            br#"{"error":"Too many requests. Please try again later."}"#,
        );
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                status: 429,
                message: "Too many requests. Please try again later.".to_string()
            }
        );
    }

    #[test]
    fn test_unparseable_error_body_falls_back() {
        for body in [&b"<html>Bad Gateway</html>"[..], b"", br#"{"error":""}"#] {
            assert_eq!(
                interpret_response(502, body),
                SubmitOutcome::Rejected {
                    status: 502,
                    message: "Failed to send message".to_string()
                }
            );
        }
    }

    #[test]
    fn test_unparseable_success_body_is_still_sent() {
        assert_eq!(
            interpret_response(200, b"OK"),
            SubmitOutcome::Sent {
                message: String::new()
            }
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let gateway = HttpGateway::new("http://localhost:3000/", Duration::from_secs(5)).unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:3000");
    }
}
