//! Application state for the API server.

use std::sync::Arc;

/// Shared application state.
///
/// Generic over the tool service `S` so handlers can be tested with a service
/// built on a mock command runner.
pub struct AppState<S> {
    service: Arc<S>,
}

// Manual Clone impl - only the Arc needs to be cloneable, not S
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S> AppState<S> {
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Version of this server, reported by the root and health endpoints.
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
