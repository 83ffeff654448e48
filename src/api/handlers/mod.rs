//! System and MCP endpoint handlers.

mod mcp;
mod system;

pub use mcp::*;
pub use system::*;

use axum::{Json, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::freelo::FreeloError;

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Freelo API error (404): Task not found")]
    pub error: String,
}

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Upstream statuses pass through; transport failures become 502.
pub fn map_freelo_error(e: FreeloError) -> HandlerError {
    let status = match &e {
        FreeloError::Api { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        FreeloError::ConnectionFailed { .. } | FreeloError::InvalidResponse { .. } => {
            StatusCode::BAD_GATEWAY
        }
        FreeloError::Client { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
