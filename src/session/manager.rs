//! Per-client session routing.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, OnceLock, Weak};

use axum::extract::Request;
use axum::response::Response;
use futures_util::FutureExt;
use tracing::{debug, error, info, instrument, warn};

use super::envelope;
use super::error::TransportError;
use super::gateway::SessionGateway;
use super::id::IdGenerator;
use super::store::SessionStore;
use super::transport::{SessionHooks, SessionTransport, TransportFactory};

/// Routes each request to the transport of its session, creating one on
/// first contact and reclaiming it when the session closes.
///
/// The store and id generator are injected so tests can observe and steer
/// both.
pub struct SessionManager<F: TransportFactory> {
    factory: Arc<F>,
    store: SessionStore<F::Transport>,
    id_generator: Arc<dyn IdGenerator>,
}

// Manual Clone impl - only the Arcs are cloned
impl<F: TransportFactory> Clone for SessionManager<F> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            store: self.store.clone(),
            id_generator: Arc::clone(&self.id_generator),
        }
    }
}

impl<F: TransportFactory> SessionManager<F> {
    pub fn new(
        factory: F,
        store: SessionStore<F::Transport>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            factory: Arc::new(factory),
            store,
            id_generator,
        }
    }

    pub fn store(&self) -> &SessionStore<F::Transport> {
        &self.store
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    /// Transport name of the underlying factory.
    pub fn kind(&self) -> &'static str {
        F::KIND
    }

    /// Serve one inbound request.
    ///
    /// Never fails: setup or dispatch errors, panics included, become a
    /// generic JSON-RPC internal error.
    pub async fn handle_request(&self, request: Request) -> Response {
        match AssertUnwindSafe(self.dispatch(request)).catch_unwind().await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                error!(error = %e, "Failed to handle MCP request");
                envelope::internal_error()
            }
            Err(_) => {
                error!("MCP request handler panicked");
                envelope::internal_error()
            }
        }
    }

    async fn dispatch(&self, request: Request) -> Result<Response, TransportError> {
        if let Some(id) = self.factory.session_id(&request) {
            if let Some(transport) = self.store.get(&id) {
                debug!(session_id = %id, "Routing request to existing session");
                return transport.handle_request(request).await;
            }
            debug!(session_id = %id, "Unknown session id, starting a new session");
        }

        let transport = self.open_session()?;
        let result = match transport.connect().await {
            Ok(()) => transport.handle_request(request).await,
            Err(e) => Err(e),
        };

        // Only sessions that completed their handshake stay alive.
        let registered = transport
            .session_id()
            .is_some_and(|id| self.store.is_registered(&id, &transport));
        if !registered {
            debug!("Discarding session that did not initialize");
            if let Err(e) = transport.close().await {
                debug!(error = %e, "Failed to close discarded session");
            }
        }

        result
    }

    /// Build a transport whose hooks register it on initialization and
    /// unregister it on close.
    fn open_session(&self) -> Result<Arc<F::Transport>, TransportError> {
        let slot: Arc<OnceLock<Weak<F::Transport>>> = Arc::new(OnceLock::new());

        let on_initialized = {
            let store = self.store.clone();
            let slot = Arc::clone(&slot);
            Box::new(move |id: &str| {
                let Some(transport) = slot.get().and_then(Weak::upgrade) else {
                    return;
                };
                if store.insert(id, transport) {
                    info!(session_id = %id, "Session initialized");
                } else {
                    warn!(session_id = %id, "Session id already in use, not registering");
                }
            })
        };

        let on_close = {
            let store = self.store.clone();
            let slot = Arc::clone(&slot);
            Box::new(move |id: &str| {
                let removed = slot
                    .get()
                    .is_some_and(|transport| store.remove_if_same(id, transport));
                if removed {
                    info!(session_id = %id, "Session closed");
                }
            })
        };

        let hooks = SessionHooks::new(
            Arc::clone(&self.id_generator),
            on_initialized,
            on_close,
        );
        let transport = self.factory.create(hooks)?;
        let _ = slot.set(Arc::downgrade(&transport));
        debug!(transport = F::KIND, "Created session transport");

        Ok(transport)
    }

    /// Close every live session, best effort, then empty the store.
    #[instrument(skip(self), fields(transport = F::KIND))]
    pub async fn shutdown(&self) {
        let sessions = self.store.snapshot();
        info!(count = sessions.len(), "Closing active sessions");

        for (id, transport) in sessions {
            match transport.close().await {
                Ok(()) => info!(session_id = %id, "Closed session"),
                Err(e) => warn!(session_id = %id, error = %e, "Failed to close session"),
            }
        }

        self.store.clear();
    }
}

impl<F: TransportFactory> SessionGateway for SessionManager<F> {
    fn kind(&self) -> &'static str {
        F::KIND
    }

    fn session_count(&self) -> usize {
        self.store.len()
    }

    async fn handle_request(&self, request: Request) -> Response {
        SessionManager::handle_request(self, request).await
    }

    async fn shutdown(&self) {
        SessionManager::shutdown(self).await
    }
}
