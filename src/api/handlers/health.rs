//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "mail_relay": { "status": "ok", "message": "Relay reachable" },
///     "rate_limit_store": { "status": "ok", "message": "memory store available" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (relay_check, store_check) = tokio::join!(check_relay(&state), check_store(&state));

    let all_healthy = relay_check.is_ok() && store_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            mail_relay: relay_check,
            rate_limit_store: store_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_relay(state: &AppState) -> CheckStatus {
    if state.contact_service.relay_healthy().await {
        CheckStatus::ok("Relay reachable")
    } else {
        CheckStatus::error("Relay connection failed")
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    let backend = state.contact_service.rate_limit_backend();

    if state.contact_service.rate_limit_store_healthy().await {
        CheckStatus::ok(format!("{} store available", backend))
    } else {
        CheckStatus::error(format!("{} store unreachable", backend))
    }
}
