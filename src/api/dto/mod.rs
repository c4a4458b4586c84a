//! Data Transfer Objects for API responses.
//!
//! All DTOs use Serde for JSON serialization. The contact request body lives
//! in the domain layer because the form client sends the same shape.

pub mod contact;
pub mod health;
