//! Request helpers shared by the HTTP handlers.

pub mod client_ip;

pub use client_ip::ClientId;
