//! HTTP server initialization and runtime setup.
//!
//! Selects the rate-limit store and mail relay, builds the router and runs
//! the Axum server until a shutdown signal arrives.

use crate::application::services::{ContactService, ContactSettings};
use crate::config::{Config, MailRelayKind};
use crate::infrastructure::mail::{LogRelay, MailRelay, SmtpRelay};
use crate::infrastructure::rate_limit::{
    MemoryRateLimitStore, RateLimitStore, RedisRateLimitStore,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Rate-limit store (Redis, or in-memory fallback)
/// - Mail relay (SMTP or log)
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - The SMTP relay cannot be configured
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_rate_limit_store(&config).await;
    let relay = build_mail_relay(&config)?;

    let contact_service = Arc::new(ContactService::new(
        store,
        relay,
        ContactSettings {
            recipient: config.mail_to.clone(),
            relay_timeout: config.relay_timeout(),
        },
    ));

    let state = AppState::new(contact_service, config.behind_proxy);

    let app = app_router(state, &config.cors_allowed_origins);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Connects to Redis when configured, falling back to the in-memory store.
async fn build_rate_limit_store(config: &Config) -> Arc<dyn RateLimitStore> {
    let policy = config.rate_limit_policy();

    if let Some(redis_url) = &config.redis_url {
        match RedisRateLimitStore::connect(redis_url, policy).await {
            Ok(redis) => {
                tracing::info!("Rate limiting shared via Redis");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Using in-memory rate limiting.",
                    e
                );
            }
        }
    } else {
        tracing::info!("Rate limiting in memory (per process)");
    }

    Arc::new(MemoryRateLimitStore::new(policy))
}

fn build_mail_relay(config: &Config) -> Result<Arc<dyn MailRelay>> {
    match config.mail_relay {
        MailRelayKind::Smtp => {
            let relay = SmtpRelay::new(&config.smtp, &config.mail_from)
                .context("Failed to configure SMTP relay")?;
            Ok(Arc::new(relay))
        }
        MailRelayKind::Log => {
            tracing::warn!("MAIL_RELAY=log: messages are logged, not sent");
            Ok(Arc::new(LogRelay::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
