//! Handler for the contact submission endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::debug;

use crate::api::dto::contact::SendEmailResponse;
use crate::domain::entities::ContactDraft;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::ClientId;

/// Relays a contact form submission by email.
///
/// # Endpoint
///
/// `POST /api/send-email`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Jane Doe",
///   "email": "jane@example.com",
///   "message": "Let's talk about the new project opportunity."
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "message": "Email sent successfully" }
/// ```
///
/// # Errors
///
/// - **429**: the client exceeded its quota for the current window
/// - **400**: missing fields, invalid email, length limits, or an undecodable body
/// - **500**: the mail relay failed; the relay error is never returned
///
/// The rate limit is checked first, so an undecodable body still counts
/// against the quota.
pub async fn send_email_handler(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
    payload: Result<Json<ContactDraft>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, AppError> {
    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => {
            debug!("Undecodable contact body from {}: {}", client_id, rejection);
            return Err(state.contact_service.reject_malformed(&client_id).await);
        }
    };

    let receipt = state.contact_service.submit(&client_id, draft).await?;

    Ok(Json(SendEmailResponse::sent(receipt.message)))
}
