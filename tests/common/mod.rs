#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use contact_relay::api::handlers::{health_handler, send_email_handler};
use contact_relay::application::services::{ContactService, ContactSettings};
use contact_relay::domain::entities::OutboundMessage;
use contact_relay::infrastructure::mail::{MailRelay, RelayError};
use contact_relay::infrastructure::rate_limit::{MemoryRateLimitStore, RateLimitStore};
use contact_relay::state::AppState;

pub const RECIPIENT: &str = "owner@example.com";

/// Relay double that records every dispatched message.
pub struct RecordingRelay {
    sent: Mutex<Vec<OutboundMessage>>,
    failure: Option<String>,
    healthy: bool,
}

impl RecordingRelay {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: None,
            healthy: true,
        }
    }

    /// A relay that rejects every message with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::new()
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailRelay for RecordingRelay {
    async fn dispatch(&self, message: OutboundMessage) -> Result<(), RelayError> {
        if let Some(reason) = &self.failure {
            return Err(RelayError::Rejected(reason.clone()));
        }

        self.sent.lock().unwrap().push(message);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}

pub fn create_test_service(
    relay: Arc<RecordingRelay>,
    store: Arc<dyn RateLimitStore>,
) -> ContactService {
    ContactService::new(
        store,
        relay,
        ContactSettings {
            recipient: RECIPIENT.to_string(),
            relay_timeout: Duration::from_secs(10),
        },
    )
}

/// State with an in-memory store and the default 5 per 4 minutes policy.
///
/// `behind_proxy` is set so tests pick the client identifier with
/// `X-Forwarded-For`.
pub fn create_test_state(relay: Arc<RecordingRelay>) -> AppState {
    let store = Arc::new(MemoryRateLimitStore::default());
    AppState::new(Arc::new(create_test_service(relay, store)), true)
}

pub fn test_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/send-email", post(send_email_handler))
        .with_state(state)
}

pub fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "message": "Let's talk about the new project opportunity."
    })
}
