//! Domain layer containing contact entities and the shared field rules.
//!
//! # Architecture
//!
//! - [`entities`] - Submission data structures
//! - [`validation`] - Pure field validators shared by server and form controller
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure
//! - Validation failures are reported as [`crate::error::AppError::Validation`],
//!   the crate-wide error type, so handlers can return them unchanged
//! - Store and relay contracts live next to their implementations in
//!   [`crate::infrastructure`]
//! - Orchestration is done by services (see [`crate::application::services`])
//!
//! # Submission Flow
//!
//! 1. HTTP handler receives a [`entities::ContactDraft`]
//! 2. The client identifier is checked against the rate-limit store
//! 3. The draft is validated into a [`entities::ContactRequest`]
//! 4. An [`entities::OutboundMessage`] is rendered and dispatched via the mail relay

pub mod entities;
pub mod validation;
