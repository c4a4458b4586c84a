//! Application layer services implementing business logic.
//!
//! Services orchestrate domain rules and infrastructure seams and provide a
//! narrow API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::contact_service::ContactService`] - Rate limiting, validation and relay of contact messages

pub mod services;
