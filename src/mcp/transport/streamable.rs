//! Streamable HTTP transport.
//!
//! rmcp's [`StreamableHttpService`] speaks the wire protocol. This module
//! supplies the session bookkeeping behind it ([`StreamableSessions`]) and
//! the front door in front of it ([`StreamableEndpoint`]), which answers
//! undecodable or conflicting client messages with JSON-RPC errors before
//! they reach a session.

use std::io;
use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderMap, Method, StatusCode},
    response::Response,
};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures_util::{Stream, StreamExt, stream};
use rmcp::ServerHandler;
use rmcp::model::{ClientJsonRpcMessage, ServerJsonRpcMessage};
use rmcp::transport::WorkerTransport;
use rmcp::transport::streamable_http_server::session::local::{
    EventIdParseError, LocalSessionHandle, SessionConfig, SessionError, SessionTransport,
    create_local_session,
};
use rmcp::transport::streamable_http_server::session::{
    ServerSseMessage, SessionId, SessionManager,
};
use rmcp::transport::{StreamableHttpServerConfig, StreamableHttpService};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::{MAX_BODY_BYTES, is_json_content};
use crate::session::envelope::{self, INVALID_REQUEST, PARSE_ERROR, SERVER_ERROR};
use crate::session::{IdGenerator, SessionGateway, SessionStore};

pub const MCP_SESSION_ID: &str = "mcp-session-id";

#[derive(Debug, Error)]
pub enum StreamableError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Session id already in use: {0}")]
    IdInUse(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Invalid event id: {0}")]
    InvalidEventId(#[from] EventIdParseError),
}

/// Session bookkeeping for [`StreamableHttpService`].
///
/// A session is created on the first `initialize` request and stays pending
/// until its handler answers the handshake; only then is it registered in
/// the store. Ids come from the injected [`IdGenerator`].
#[derive(Clone)]
pub struct StreamableSessions {
    store: SessionStore<LocalSessionHandle>,
    pending: SessionStore<LocalSessionHandle>,
    id_generator: Arc<dyn IdGenerator>,
    config: SessionConfig,
}

impl StreamableSessions {
    pub fn new(store: SessionStore<LocalSessionHandle>, id_generator: Arc<dyn IdGenerator>) -> Self {
        // Sessions live until closed; no idle eviction.
        let mut config = SessionConfig::default();
        config.keep_alive = None;
        Self {
            store,
            pending: SessionStore::new(),
            id_generator,
            config,
        }
    }

    pub fn store(&self) -> &SessionStore<LocalSessionHandle> {
        &self.store
    }

    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    fn live(&self, id: &SessionId) -> Result<Arc<LocalSessionHandle>, StreamableError> {
        self.store
            .get(id)
            .ok_or_else(|| StreamableError::SessionNotFound(id.to_string()))
    }

    /// Close every live session, best effort, then empty the store.
    #[instrument(skip(self), fields(transport = "streamable-http"))]
    pub async fn shutdown(&self) {
        let sessions = self.store.snapshot();
        info!(count = sessions.len(), "Closing active sessions");

        for (id, handle) in sessions {
            match close_handle(&handle).await {
                Ok(()) => info!(session_id = %id, "Closed session"),
                Err(e) => warn!(session_id = %id, error = %e, "Failed to close session"),
            }
        }
        self.store.clear();

        for (_, handle) in self.pending.snapshot() {
            let _ = close_handle(&handle).await;
        }
        self.pending.clear();
    }
}

async fn close_handle(handle: &LocalSessionHandle) -> Result<(), SessionError> {
    match handle.close().await {
        // Worker already gone
        Ok(()) | Err(SessionError::SessionServiceTerminated) => Ok(()),
        Err(e) => Err(e),
    }
}

impl SessionManager for StreamableSessions {
    type Error = StreamableError;
    type Transport = SessionTransport;

    async fn create_session(&self) -> Result<(SessionId, Self::Transport), Self::Error> {
        let id = self.id_generator.generate();
        if self.store.contains(&id) {
            return Err(StreamableError::IdInUse(id));
        }

        let (handle, worker) = create_local_session(id.clone(), self.config.clone());
        if !self.pending.insert(id.clone(), Arc::new(handle)) {
            return Err(StreamableError::IdInUse(id));
        }
        debug!(session_id = %id, "Created session transport");

        Ok((id.into(), WorkerTransport::spawn(worker)))
    }

    async fn initialize_session(
        &self,
        id: &SessionId,
        message: ClientJsonRpcMessage,
    ) -> Result<ServerJsonRpcMessage, Self::Error> {
        let handle = self
            .pending
            .remove(id)
            .ok_or_else(|| StreamableError::SessionNotFound(id.to_string()))?;

        let response = match handle.initialize(message).await {
            Ok(response) => response,
            Err(e) => {
                let _ = close_handle(&handle).await;
                return Err(e.into());
            }
        };

        // Only sessions that completed their handshake are registered.
        if !matches!(response, ServerJsonRpcMessage::Response(_)) {
            debug!(session_id = %id, "Discarding session that did not initialize");
            let _ = close_handle(&handle).await;
            return Ok(response);
        }
        if !self.store.insert(id.to_string(), Arc::clone(&handle)) {
            warn!(session_id = %id, "Session id already in use, not registering");
            let _ = close_handle(&handle).await;
            return Err(StreamableError::IdInUse(id.to_string()));
        }

        info!(session_id = %id, "Session initialized");
        Ok(response)
    }

    async fn has_session(&self, id: &SessionId) -> Result<bool, Self::Error> {
        Ok(self.store.contains(id))
    }

    /// Idempotent: unknown ids are ignored.
    async fn close_session(&self, id: &SessionId) -> Result<(), Self::Error> {
        if let Some(handle) = self.store.remove(id) {
            info!(session_id = %id, "Session closed");
            close_handle(&handle).await?;
        } else if let Some(handle) = self.pending.remove(id) {
            close_handle(&handle).await?;
        }
        Ok(())
    }

    async fn create_stream(
        &self,
        id: &SessionId,
        message: ClientJsonRpcMessage,
    ) -> Result<impl Stream<Item = ServerSseMessage> + Send + Sync + 'static, Self::Error> {
        let handle = self.live(id)?;
        let receiver = handle.establish_request_wise_channel().await?;
        let http_request_id = receiver.http_request_id;
        handle.push_message(message, http_request_id).await?;

        let priming = self.config.sse_retry.map(|retry| {
            let event_id = match http_request_id {
                Some(id) => format!("0/{id}"),
                None => "0".to_string(),
            };
            ServerSseMessage::priming(event_id, retry)
        });
        Ok(stream::iter(priming).chain(ReceiverStream::new(receiver.inner)))
    }

    async fn accept_message(
        &self,
        id: &SessionId,
        message: ClientJsonRpcMessage,
    ) -> Result<(), Self::Error> {
        self.live(id)?.push_message(message, None).await?;
        Ok(())
    }

    async fn create_standalone_stream(
        &self,
        id: &SessionId,
    ) -> Result<impl Stream<Item = ServerSseMessage> + Send + Sync + 'static, Self::Error> {
        let receiver = self.live(id)?.establish_common_channel().await?;
        Ok(ReceiverStream::new(receiver.inner))
    }

    async fn resume(
        &self,
        id: &SessionId,
        last_event_id: String,
    ) -> Result<impl Stream<Item = ServerSseMessage> + Send + Sync + 'static, Self::Error> {
        let handle = self.live(id)?;
        let receiver = handle.resume(last_event_id.parse()?).await?;
        Ok(ReceiverStream::new(receiver.inner))
    }
}

/// `/mcp/v1/endpoint`: checks each client message, then hands the request
/// to rmcp's [`StreamableHttpService`].
///
/// - bodies that are not JSON or not a JSON-RPC client message get a
///   JSON-RPC error instead of reaching a session
/// - a request id already in flight on the same session is rejected
/// - a `POST` naming an unknown session is treated as carrying no session,
///   so an `initialize` starts a fresh one
pub struct StreamableEndpoint<S> {
    service: StreamableHttpService<S, StreamableSessions>,
    sessions: StreamableSessions,
    in_flight: Arc<DashMap<String, ()>>,
    streams: CancellationToken,
}

// Manual Clone impl - S itself does not need to be Clone
impl<S> Clone for StreamableEndpoint<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            sessions: self.sessions.clone(),
            in_flight: Arc::clone(&self.in_flight),
            streams: self.streams.clone(),
        }
    }
}

impl<S: ServerHandler> StreamableEndpoint<S> {
    pub fn new<F>(service_factory: F, sessions: StreamableSessions) -> Self
    where
        F: Fn() -> Result<S, io::Error> + Send + Sync + 'static,
    {
        let streams = CancellationToken::new();
        // Bound to all interfaces; any Host is accepted.
        let config = StreamableHttpServerConfig::default()
            .disable_allowed_hosts()
            .with_cancellation_token(streams.clone());
        let service =
            StreamableHttpService::new(service_factory, Arc::new(sessions.clone()), config);

        Self {
            service,
            sessions,
            in_flight: Arc::new(DashMap::new()),
            streams,
        }
    }

    pub fn sessions(&self) -> &StreamableSessions {
        &self.sessions
    }

    async fn forward(&self, request: Request) -> Response {
        self.service.handle(request).await.map(Body::new)
    }

    async fn handle_post(&self, request: Request) -> Response {
        let (mut parts, body) = request.into_parts();
        if !is_json_content(&parts.headers) {
            return envelope::error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                SERVER_ERROR,
                "Unsupported Media Type: Content-Type must be application/json",
            );
        }

        let Ok(bytes) = to_bytes(body, MAX_BODY_BYTES).await else {
            return envelope::error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                SERVER_ERROR,
                "Payload Too Large",
            );
        };
        let Ok(message) = serde_json::from_slice::<Value>(&bytes) else {
            return envelope::error_response(
                StatusCode::BAD_REQUEST,
                PARSE_ERROR,
                "Parse error: Invalid JSON",
            );
        };
        if ClientJsonRpcMessage::deserialize(&message).is_err() {
            debug!("Rejecting undecodable client message");
            return envelope::error_response(
                StatusCode::BAD_REQUEST,
                INVALID_REQUEST,
                "Invalid Request: Not a valid MCP client message",
            );
        }

        let session = match session_header(&parts.headers) {
            Some(id) if self.sessions.store().contains(&id) => Some(id),
            Some(id) => {
                debug!(session_id = %id, "Unknown session id, starting a new session");
                parts.headers.remove(MCP_SESSION_ID);
                None
            }
            None => None,
        };
        if session.is_none() && !envelope::is_initialize_request(&message) {
            return envelope::error_response(
                StatusCode::BAD_REQUEST,
                SERVER_ERROR,
                "Bad Request: No valid session ID provided",
            );
        }

        let in_flight = match session {
            Some(id) if envelope::is_request(&message) => {
                let key = format!("{id}/{}", envelope::request_key(&message));
                match self.in_flight.entry(key.clone()) {
                    Entry::Occupied(_) => {
                        warn!(session_id = %id, "Request id already in flight");
                        return envelope::error_response(
                            StatusCode::BAD_REQUEST,
                            INVALID_REQUEST,
                            "Invalid Request: Request id already in flight for this session",
                        );
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(());
                    }
                }
                Some(InFlight {
                    requests: Arc::clone(&self.in_flight),
                    key,
                })
            }
            _ => None,
        };

        let response = self
            .forward(Request::from_parts(parts, Body::from(bytes)))
            .await;

        // The id stays taken until its response stream is dropped.
        match in_flight {
            Some(guard) => response.map(|body| {
                Body::from_stream(body.into_data_stream().map(move |chunk| {
                    let _held = &guard;
                    chunk
                }))
            }),
            None => response,
        }
    }
}

impl<S: ServerHandler> SessionGateway for StreamableEndpoint<S> {
    fn kind(&self) -> &'static str {
        "streamable-http"
    }

    fn session_count(&self) -> usize {
        self.sessions.session_count()
    }

    #[instrument(skip_all, fields(method = %request.method()))]
    async fn handle_request(&self, request: Request) -> Response {
        if request.method() == Method::POST {
            self.handle_post(request).await
        } else {
            self.forward(request).await
        }
    }

    async fn shutdown(&self) {
        self.sessions.shutdown().await;
        self.in_flight.clear();
        self.streams.cancel();
    }
}

struct InFlight {
    requests: Arc<DashMap<String, ()>>,
    key: String,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.requests.remove(&self.key);
    }
}

fn session_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(MCP_SESSION_ID)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
