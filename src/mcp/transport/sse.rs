//! Legacy HTTP+SSE transport.
//!
//! `GET /sse` opens the event stream and announces the message endpoint;
//! clients then `POST /message` with `X-Session-ID` (or `?sessionId=`) and
//! receive every reply over the stream.

use std::convert::Infallible;
use std::io;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use axum::{
    body::to_bytes,
    extract::Request,
    http::{HeaderValue, Method, StatusCode},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures_util::{StreamExt, future, stream};
use rmcp::ServerHandler;
use rmcp::model::ClientJsonRpcMessage;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use super::channel::{Lifecycle, ServiceChannel, ServiceLines, lock};
use super::{MAX_BODY_BYTES, is_json_content, session_not_found};
use crate::session::envelope::{self, INVALID_REQUEST, PARSE_ERROR, SERVER_ERROR};
use crate::session::{SessionHooks, SessionTransport, TransportError, TransportFactory};

pub const X_SESSION_ID: &str = "x-session-id";
pub const MESSAGE_PATH: &str = "/message";

pub struct SseFactory<S, F> {
    service_factory: F,
    _handler: PhantomData<fn() -> S>,
}

impl<S, F> SseFactory<S, F>
where
    S: ServerHandler,
    F: Fn() -> Result<S, io::Error> + Send + Sync + 'static,
{
    pub fn new(service_factory: F) -> Self {
        Self {
            service_factory,
            _handler: PhantomData,
        }
    }
}

impl<S, F> TransportFactory for SseFactory<S, F>
where
    S: ServerHandler,
    F: Fn() -> Result<S, io::Error> + Send + Sync + 'static,
{
    type Transport = SseTransport<S>;

    const SESSION_HEADER: &'static str = X_SESSION_ID;
    const KIND: &'static str = "sse";

    fn create(&self, hooks: SessionHooks) -> Result<Arc<Self::Transport>, TransportError> {
        let handler =
            (self.service_factory)().map_err(|e| TransportError::Setup(e.to_string()))?;
        Ok(Arc::new(SseTransport::new(handler, hooks)))
    }

    /// Header first, then the `sessionId` query parameter from the
    /// announced endpoint URL.
    fn session_id(&self, request: &Request) -> Option<String> {
        let from_header = request
            .headers()
            .get(X_SESSION_ID)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty());
        if let Some(id) = from_header {
            return Some(id.to_string());
        }

        request
            .uri()
            .query()?
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "sessionId")
            .map(|(_, id)| id.trim().to_string())
            .filter(|id| !id.is_empty())
    }
}

pub struct SseTransport<S> {
    handler: Mutex<Option<S>>,
    shared: Arc<Shared>,
}

struct Shared {
    hooks: SessionHooks,
    /// Drawn at construction; only announced once the stream opens.
    session_id: String,
    opened: AtomicBool,
    channel: OnceLock<ServiceChannel>,
    stream: Mutex<Option<mpsc::UnboundedSender<String>>>,
    lifecycle: Lifecycle,
}

impl<S: ServerHandler> SseTransport<S> {
    pub fn new(handler: S, hooks: SessionHooks) -> Self {
        let session_id = hooks.generate_id();
        Self {
            handler: Mutex::new(Some(handler)),
            shared: Arc::new(Shared {
                hooks,
                session_id,
                opened: AtomicBool::new(false),
                channel: OnceLock::new(),
                stream: Mutex::new(None),
                lifecycle: Lifecycle::default(),
            }),
        }
    }

    fn is_opened(&self) -> bool {
        self.shared.opened.load(Ordering::SeqCst)
    }

    /// Whether the handler has been started.
    #[cfg(test)]
    pub(crate) fn is_serving(&self) -> bool {
        self.shared.channel.get().is_some()
    }

    /// Start the handler on a fresh pipe and forward its output to the
    /// event stream.
    fn start_service(&self) -> Result<(), TransportError> {
        let handler = lock(&self.handler)
            .take()
            .ok_or(TransportError::AlreadyConnected)?;

        let (channel, lines) = ServiceChannel::spawn(handler);
        if self.shared.channel.set(channel).is_err() {
            return Err(TransportError::AlreadyConnected);
        }
        tokio::spawn(read_loop(Arc::clone(&self.shared), lines));
        Ok(())
    }

    fn handle_get(&self) -> Result<Response, TransportError> {
        if self.shared.opened.swap(true, Ordering::SeqCst) {
            return Ok(envelope::error_response(
                StatusCode::CONFLICT,
                SERVER_ERROR,
                "Conflict: SSE stream already open for this session",
            ));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        *lock(&self.shared.stream) = Some(tx);
        self.start_service()?;

        let id = &self.shared.session_id;
        self.shared.hooks.initialized(id);

        let endpoint = Event::default()
            .event("endpoint")
            .data(format!("{MESSAGE_PATH}?sessionId={id}"));

        // The session ends when the client goes away.
        let guard = self.shared.lifecycle.close_on_drop();
        let messages = stream::unfold((rx, guard), |(mut rx, guard)| async move {
            let line = rx.recv().await?;
            Some((
                Ok::<_, Infallible>(Event::default().event("message").data(line)),
                (rx, guard),
            ))
        });
        let events = stream::once(future::ready(Ok::<_, Infallible>(endpoint))).chain(messages);

        let mut response = Sse::new(events)
            .keep_alive(KeepAlive::default())
            .into_response();
        if let Ok(value) = HeaderValue::from_str(id) {
            response.headers_mut().insert(X_SESSION_ID, value);
        }
        Ok(response)
    }

    async fn handle_post(&self, request: Request) -> Result<Response, TransportError> {
        if !self.is_opened() {
            return Ok(session_not_found());
        }

        let (parts, body) = request.into_parts();
        if !is_json_content(&parts.headers) {
            return Ok(envelope::error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                SERVER_ERROR,
                "Unsupported Media Type: Content-Type must be application/json",
            ));
        }

        let Ok(bytes) = to_bytes(body, MAX_BODY_BYTES).await else {
            return Ok(envelope::error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                SERVER_ERROR,
                "Payload Too Large",
            ));
        };
        let Ok(parsed) = serde_json::from_slice::<Value>(&bytes) else {
            return Ok(envelope::error_response(
                StatusCode::BAD_REQUEST,
                PARSE_ERROR,
                "Parse error: Invalid JSON",
            ));
        };

        let messages = match parsed {
            Value::Array(items) => items,
            single => vec![single],
        };
        let decodable = messages
            .iter()
            .all(|message| ClientJsonRpcMessage::deserialize(message).is_ok());
        if messages.is_empty() || !decodable {
            debug!(session_id = %self.shared.session_id, "Rejecting undecodable client message");
            return Ok(envelope::error_response(
                StatusCode::BAD_REQUEST,
                INVALID_REQUEST,
                "Invalid Request: Not a valid MCP client message",
            ));
        }

        let channel = self
            .shared
            .channel
            .get()
            .ok_or(TransportError::NotConnected)?;
        for message in &messages {
            channel.send(message).await?;
        }

        Ok((StatusCode::ACCEPTED, "Accepted").into_response())
    }
}

impl<S: ServerHandler> SessionTransport for SseTransport<S> {
    fn session_id(&self) -> Option<String> {
        self.is_opened().then(|| self.shared.session_id.clone())
    }

    /// The handler only starts once `GET /sse` opens the stream.
    async fn connect(&self) -> Result<(), TransportError> {
        if lock(&self.handler).is_none() {
            return Err(TransportError::AlreadyConnected);
        }
        Ok(())
    }

    #[instrument(skip_all, fields(method = %request.method(), session_id = %self.shared.session_id))]
    async fn handle_request(&self, request: Request) -> Result<Response, TransportError> {
        if self.shared.lifecycle.is_closing() {
            return Ok(session_not_found());
        }

        match *request.method() {
            Method::GET => self.handle_get(),
            Method::POST => self.handle_post(request).await,
            Method::DELETE => {
                self.close().await?;
                Ok(StatusCode::OK.into_response())
            }
            _ => Ok(envelope::method_not_allowed("GET, POST, DELETE")),
        }
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.shared.lifecycle.request_close();
        if self.shared.channel.get().is_some() {
            self.shared.lifecycle.wait_closed().await;
        } else {
            self.shared.finish().await;
        }
        Ok(())
    }
}

impl<S> Drop for SseTransport<S> {
    fn drop(&mut self) {
        self.shared.lifecycle.request_close();
    }
}

impl Shared {
    fn forward(&self, line: String) {
        let stream = lock(&self.stream);
        match stream.as_ref() {
            Some(tx) if tx.send(line).is_ok() => {}
            _ => debug!(session_id = %self.session_id, "SSE stream gone, dropping server message"),
        }
    }

    async fn finish(&self) {
        self.lifecycle.request_close();
        if let Some(channel) = self.channel.get() {
            channel.shutdown().await;
        }
        lock(&self.stream).take();

        if self.lifecycle.first_close() && self.opened.load(Ordering::SeqCst) {
            self.hooks.closed(&self.session_id);
        }
        self.lifecycle.mark_closed();
    }
}

async fn read_loop(shared: Arc<Shared>, mut lines: ServiceLines) {
    loop {
        let line = tokio::select! {
            _ = shared.lifecycle.closing() => break,
            line = lines.next_line() => line,
        };
        match line {
            Ok(Some(line)) => shared.forward(line),
            Ok(None) => {
                debug!(session_id = %shared.session_id, "MCP service closed its output");
                break;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read from MCP service");
                break;
            }
        }
    }
    shared.finish().await;
}
