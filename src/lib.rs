//! # Contact Relay
//!
//! Backend for a portfolio contact form, built with Axum: validates
//! submissions, limits each client to a few messages per window, and relays
//! them to the site owner by email.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Validation rules and contact entities
//! - **Application Layer** ([`application`]) - Submission orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Rate-limit stores and mail relays
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//! - **Form Layer** ([`form`]) - Client-side form controller and HTTP gateway
//!
//! ## Quick Start
//!
//! ```bash
//! export EMAIL_USER="owner@example.com"
//! export EMAIL_APP_PASSWORD="app-password"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod form;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{ContactService, ContactSettings};
    pub use crate::domain::entities::{ContactDraft, ContactRequest, OutboundMessage};
    pub use crate::error::AppError;
    pub use crate::form::{ContactForm, FormStatus, HttpGateway, SubmitGateway};
    pub use crate::infrastructure::mail::{MailRelay, RelayError};
    pub use crate::infrastructure::rate_limit::{
        MemoryRateLimitStore, RateLimitPolicy, RateLimitStore,
    };
    pub use crate::state::AppState;
}
