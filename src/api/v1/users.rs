//! User handlers.

use axum::{Json, extract::State};
use serde_json::Value;
use tracing::instrument;

use crate::api::AppState;
use crate::api::handlers::{ErrorResponse, HandlerError, map_freelo_error};
use crate::session::SessionGateway;

/// List collaborating users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "Users"),
        (status = 401, description = "Bad Freelo credentials", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_users<S: SessionGateway>(
    State(state): State<AppState<S>>,
) -> Result<Json<Value>, HandlerError> {
    let users = state.freelo().users().await.map_err(map_freelo_error)?;
    Ok(Json(users))
}
