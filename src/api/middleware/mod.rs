//! HTTP middleware for request processing.
//!
//! Provides cross-origin access and observability middleware. Rate limiting
//! is part of the submission itself, see
//! [`crate::application::services::ContactService`].

pub mod cors;
pub mod tracing;
