//! Seams between the session manager and a concrete transport.

use std::sync::Arc;

use axum::extract::Request;
use axum::response::Response;

use super::error::TransportError;
use super::id::IdGenerator;

pub type SessionCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Callbacks a transport uses to report its lifecycle to the session manager.
pub struct SessionHooks {
    id_generator: Arc<dyn IdGenerator>,
    on_initialized: SessionCallback,
    on_close: SessionCallback,
}

impl SessionHooks {
    pub fn new(
        id_generator: Arc<dyn IdGenerator>,
        on_initialized: SessionCallback,
        on_close: SessionCallback,
    ) -> Self {
        Self {
            id_generator,
            on_initialized,
            on_close,
        }
    }

    /// Draw an id for the session being established.
    pub fn generate_id(&self) -> String {
        self.id_generator.generate()
    }

    /// The session handshake completed under `session_id`.
    pub fn initialized(&self, session_id: &str) {
        (self.on_initialized)(session_id)
    }

    /// The handler behind the session stopped.
    pub fn closed(&self, session_id: &str) {
        (self.on_close)(session_id)
    }
}

/// One client's protocol channel, bound 1:1 to its own handler.
pub trait SessionTransport: Send + Sync + 'static {
    /// Id assigned during the handshake, if any yet.
    fn session_id(&self) -> Option<String>;

    /// Bind the handler to this transport and start it.
    fn connect(&self) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Process one inbound HTTP request for this session.
    fn handle_request(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;

    /// Stop the handler and wait until the transport is fully closed.
    ///
    /// Must be idempotent.
    fn close(&self) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Builds a fresh handler+transport pair per session.
pub trait TransportFactory: Send + Sync + 'static {
    type Transport: SessionTransport;

    /// Header carrying the session id on requests and responses.
    const SESSION_HEADER: &'static str;

    /// Transport name reported by the health endpoint.
    const KIND: &'static str;

    fn create(&self, hooks: SessionHooks) -> Result<Arc<Self::Transport>, TransportError>;

    /// Session id presented by the client, if any.
    fn session_id(&self, request: &Request) -> Option<String> {
        request
            .headers()
            .get(Self::SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}
