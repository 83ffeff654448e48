//! System health and status handlers.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::session::SessionGateway;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "freelo-mcp")]
    pub service: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// MCP transport served by this process
    #[schema(example = "streamable-http")]
    pub transport: String,
    /// Number of live MCP sessions
    #[schema(example = 2)]
    pub sessions: usize,
    /// RFC 3339 timestamp
    #[schema(example = "2025-01-01T00:00:00Z")]
    pub timestamp: String,
}

/// Health check endpoint
///
/// Returns the process status and the number of live MCP sessions
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health<S: SessionGateway>(
    State(state): State<AppState<S>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        transport: state.sessions().kind().to_string(),
        sessions: state.sessions().session_count(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
