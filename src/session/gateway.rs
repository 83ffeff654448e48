//! What the HTTP layer needs from an MCP session manager.

use axum::extract::Request;
use axum::response::Response;

/// Front door of one MCP transport: serves its requests, reports its live
/// sessions and drains them on shutdown.
pub trait SessionGateway: Clone + Send + Sync + 'static {
    /// Transport name reported by the health endpoint.
    fn kind(&self) -> &'static str;

    /// Number of live sessions.
    fn session_count(&self) -> usize;

    /// Serve one inbound request. Failures become JSON-RPC error responses.
    fn handle_request(&self, request: Request) -> impl Future<Output = Response> + Send;

    /// Close every live session, best effort, and empty the store.
    fn shutdown(&self) -> impl Future<Output = ()> + Send;
}
