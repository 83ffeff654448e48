//! MCP transport endpoints.

use axum::{extract::Request, extract::State, response::Response};

use crate::api::AppState;
use crate::session::SessionGateway;

/// Hand the raw request to the session manager.
///
/// No body extractor runs here; the transport reads and validates the body
/// itself.
pub async fn mcp_endpoint<S: SessionGateway>(
    State(state): State<AppState<S>>,
    request: Request,
) -> Response {
    state.sessions().handle_request(request).await
}
