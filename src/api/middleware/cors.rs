//! Cross-origin access for the portfolio front end.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

/// Creates a CORS layer for the configured origins.
///
/// Returns `None` when no origins are configured, so same-origin deployments
/// add no CORS headers. A single `*` allows any origin. Origins that are not
/// valid header values are skipped with a warning.
pub fn layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    if allowed_origins.is_empty() {
        return None;
    }

    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_origins_disables_cors() {
        assert!(layer(&[]).is_none());
    }

    #[test]
    fn test_origins_enable_cors() {
        assert!(layer(&["https://portfolio.dev".to_string()]).is_some());
        assert!(layer(&["*".to_string()]).is_some());
    }
}
