//! API route configuration.
//!
//! API endpoints are public; the per-client rate limit is the only abuse
//! mitigation.

use crate::api::handlers::send_email_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// All API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /send-email` - Relay a contact form submission by email
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/send-email", post(send_email_handler))
}
