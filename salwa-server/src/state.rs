//! Application state shared across all request handlers.

use crate::config::runtime::SharedConfig;
use salwa_core::dispatch::MessageDispatcher;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration (can be reloaded via SIGHUP).
    pub config: SharedConfig,
    /// Sends template messages to the messaging provider.
    pub dispatcher: Arc<dyn MessageDispatcher>,
}

impl AppState {
    /// Create a new AppState with the given configuration and dispatcher.
    pub fn new(config: SharedConfig, dispatcher: Arc<dyn MessageDispatcher>) -> Self {
        Self { config, dispatcher }
    }
}
