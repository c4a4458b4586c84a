use std::sync::Arc;

use crate::application::services::ContactService;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub contact_service: Arc<ContactService>,
    /// Take the client identifier from proxy headers instead of the peer address.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(contact_service: Arc<ContactService>, behind_proxy: bool) -> Self {
        Self {
            contact_service,
            behind_proxy,
        }
    }
}
