//! Task list handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::handlers::{ErrorResponse, HandlerError, map_freelo_error};
use crate::freelo::NewTasklist;
use crate::session::SessionGateway;

/// Create task list request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTasklistRequest {
    #[schema(example = "Backlog")]
    pub name: String,
    /// Budget in minutes
    #[schema(example = 600)]
    pub budget: Option<u64>,
}

/// Get a task list by ID
#[utoipa::path(
    get,
    path = "/api/v1/tasklists/{id}",
    tag = "tasklists",
    params(
        ("id" = u64, Path, description = "Freelo task list ID")
    ),
    responses(
        (status = 200, description = "Task list found"),
        (status = 404, description = "Task list not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_tasklist<S: SessionGateway>(
    State(state): State<AppState<S>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, HandlerError> {
    let tasklist = state.freelo().tasklist(id).await.map_err(map_freelo_error)?;
    Ok(Json(tasklist))
}

/// Create a task list in a project
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/tasklists",
    tag = "tasklists",
    params(
        ("id" = u64, Path, description = "Freelo project ID")
    ),
    request_body = CreateTasklistRequest,
    responses(
        (status = 201, description = "Task list created"),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_tasklist<S: SessionGateway>(
    State(state): State<AppState<S>>,
    Path(project_id): Path<u64>,
    Json(req): Json<CreateTasklistRequest>,
) -> Result<(StatusCode, Json<Value>), HandlerError> {
    let tasklist = NewTasklist {
        name: req.name,
        budget: req.budget,
    };
    let created = state
        .freelo()
        .create_tasklist(project_id, &tasklist)
        .await
        .map_err(map_freelo_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}
