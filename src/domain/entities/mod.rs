//! Core domain entities for contact submissions.
//!
//! # Entity Types
//!
//! - [`ContactDraft`] - A submission as received, fields possibly missing
//! - [`ContactRequest`] - A submission that passed every field rule
//! - [`OutboundMessage`] - The rendered email forwarded to the mail relay
//!
//! A draft only becomes a request through [`ContactDraft::into_request`], so a
//! partially valid submission can never reach the relay.

pub mod contact_request;
pub mod outbound_message;

pub use contact_request::{ContactDraft, ContactRequest};
pub use outbound_message::OutboundMessage;
