//! State shared across handlers

use chatrelay_core::RelayService;
use std::sync::Arc;

/// Shared handler state; the relay holds only immutable configuration and a pooled client
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayService>,
}

impl AppState {
    pub fn new(relay: RelayService) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}
