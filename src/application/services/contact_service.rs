//! Contact submission service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{ContactDraft, OutboundMessage};
use crate::error::{AppError, INVALID_BODY_MESSAGE};
use crate::infrastructure::mail::{MailRelay, RelayError};
use crate::infrastructure::rate_limit::RateLimitStore;

/// Bucket used when the client identifier cannot be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Message returned when the relay accepted the notification.
pub const SUCCESS_MESSAGE: &str = "Email sent successfully";

/// Settings for [`ContactService`].
#[derive(Debug, Clone)]
pub struct ContactSettings {
    /// Mailbox that receives contact notifications.
    pub recipient: String,
    /// Upper bound on a single relay dispatch.
    pub relay_timeout: Duration,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Service that accepts contact submissions and forwards them by email.
///
/// Each submission goes through, in order and short-circuiting:
///
/// 1. the per-client rate limit
/// 2. field presence and format validation
/// 3. one bounded dispatch to the mail relay
///
/// Submissions are not deduplicated and not retried: the same payload sent
/// twice is relayed twice.
pub struct ContactService {
    rate_limit_store: Arc<dyn RateLimitStore>,
    relay: Arc<dyn MailRelay>,
    settings: ContactSettings,
}

impl ContactService {
    /// Creates a new contact service.
    pub fn new(
        rate_limit_store: Arc<dyn RateLimitStore>,
        relay: Arc<dyn MailRelay>,
        settings: ContactSettings,
    ) -> Self {
        Self {
            rate_limit_store,
            relay,
            settings,
        }
    }

    /// Processes one submission from `client_id` at the current time.
    ///
    /// # Errors
    ///
    /// - [`AppError::RateLimited`] if the client used its quota for the window
    /// - [`AppError::Validation`] if a field is missing or invalid
    /// - [`AppError::RelayFailure`] if the relay failed or timed out
    pub async fn submit(
        &self,
        client_id: &str,
        draft: ContactDraft,
    ) -> Result<SubmissionReceipt, AppError> {
        self.submit_at(client_id, draft, Utc::now()).await
    }

    /// Same as [`Self::submit`] with an explicit clock reading.
    pub async fn submit_at(
        &self,
        client_id: &str,
        draft: ContactDraft,
        now: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, AppError> {
        let result = self.process(client_id, draft, now).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::counter!("contact_submissions_total", "outcome" => outcome).increment(1);

        result
    }

    /// Handles a submission whose body could not be decoded.
    ///
    /// The attempt still counts against the client's quota, so a client over
    /// its limit sees [`AppError::RateLimited`] rather than the body error.
    pub async fn reject_malformed(&self, client_id: &str) -> AppError {
        let err = match self.check_rate_limit(normalize_client(client_id), Utc::now()).await {
            Ok(()) => AppError::validation(INVALID_BODY_MESSAGE),
            Err(e) => e,
        };

        metrics::counter!("contact_submissions_total", "outcome" => err.kind()).increment(1);
        err
    }

    /// Whether the relay and the rate-limit store are reachable.
    pub async fn relay_healthy(&self) -> bool {
        self.relay.health_check().await
    }

    pub async fn rate_limit_store_healthy(&self) -> bool {
        self.rate_limit_store.health_check().await
    }

    pub fn rate_limit_backend(&self) -> &'static str {
        self.rate_limit_store.backend()
    }

    async fn process(
        &self,
        client_id: &str,
        draft: ContactDraft,
        now: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, AppError> {
        self.check_rate_limit(normalize_client(client_id), now).await?;

        let request = draft.into_request().inspect_err(|e| {
            debug!("Contact submission rejected: {}", e);
        })?;

        let message =
            OutboundMessage::compose(&request, &self.settings.recipient, now).map_err(|e| {
                error!("Failed to render contact email: {}", e);
                AppError::relay_failure()
            })?;

        self.dispatch(message).await?;

        info!("Contact message from {} relayed", request.email());

        Ok(SubmissionReceipt {
            message: SUCCESS_MESSAGE.to_string(),
            submitted_at: now,
        })
    }

    /// Counts the attempt against the client's quota.
    ///
    /// An unreachable store lets the submission through: the limiter deters
    /// abuse but does not gate correctness.
    async fn check_rate_limit(&self, client_id: &str, now: DateTime<Utc>) -> Result<(), AppError> {
        match self
            .rate_limit_store
            .check_and_increment(client_id, now)
            .await
        {
            Ok(true) => Ok(()),
            Ok(false) => {
                info!("Rate limit exceeded for client {}", client_id);
                Err(AppError::rate_limited())
            }
            Err(e) => {
                warn!("Rate-limit store unavailable, allowing submission: {}", e);
                Ok(())
            }
        }
    }

    async fn dispatch(&self, message: OutboundMessage) -> Result<(), AppError> {
        let timeout = self.settings.relay_timeout;

        let result = match tokio::time::timeout(timeout, self.relay.dispatch(message)).await {
            Ok(result) => result,
            Err(_) => Err(RelayError::Timeout(timeout)),
        };

        result.map_err(|e| {
            error!("Email error: {}", e);
            AppError::relay_failure()
        })
    }
}

fn normalize_client(client_id: &str) -> &str {
    match client_id.trim() {
        "" => UNKNOWN_CLIENT,
        id => id,
    }
}
