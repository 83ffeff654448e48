//! Application state for the API server.

use std::sync::Arc;

use crate::freelo::FreeloClient;
use crate::session::SessionGateway;

/// Shared application state.
///
/// Generic over the MCP transport so the same REST and health routes can be
/// mounted next to either the Streamable HTTP or the SSE endpoints.
#[derive(Clone)]
pub struct AppState<S: SessionGateway> {
    sessions: S,
    freelo: Arc<FreeloClient>,
}

impl<S: SessionGateway> AppState<S> {
    pub fn new(sessions: S, freelo: Arc<FreeloClient>) -> Self {
        Self { sessions, freelo }
    }

    /// Get a reference to the MCP session manager.
    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    /// Get a reference to the upstream client.
    pub fn freelo(&self) -> &FreeloClient {
        &self.freelo
    }
}
