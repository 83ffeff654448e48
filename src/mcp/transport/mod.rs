//! HTTP transports binding one `rmcp` service per session.
//!
//! - **streamable**: session bookkeeping and front door for rmcp's
//!   Streamable HTTP service
//! - **sse**: the legacy `GET /sse` + `POST /message` transport
//! - **channel**: pipe between the SSE transport and its service

mod channel;
pub mod sse;
pub mod streamable;


use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;

use crate::session::envelope::{self, SERVER_ERROR};

pub use sse::{MESSAGE_PATH, SseFactory, SseTransport, X_SESSION_ID};
pub use streamable::{MCP_SESSION_ID, StreamableEndpoint, StreamableError, StreamableSessions};

/// Upper bound on a single client message body.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("application/json"))
}

fn session_not_found() -> Response {
    envelope::error_response(StatusCode::NOT_FOUND, SERVER_ERROR, "Session not found")
}
