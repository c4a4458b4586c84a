//! Infrastructure layer for external integrations.
//!
//! This layer provides concrete implementations of the seams the contact
//! service depends on.
//!
//! # Modules
//!
//! - [`mail`] - Mail relay abstraction (SMTP and logging implementations)
//! - [`rate_limit`] - Rate-limit stores (in-memory and Redis implementations)

pub mod mail;
pub mod rate_limit;
