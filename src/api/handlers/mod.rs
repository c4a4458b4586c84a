//! HTTP request handlers for API endpoints.

pub mod contact;
pub mod health;

pub use contact::send_email_handler;
pub use health::health_handler;
