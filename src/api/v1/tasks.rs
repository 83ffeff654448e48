//! Task and comment handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::handlers::{ErrorResponse, HandlerError, map_freelo_error};
use crate::session::SessionGateway;

// =============================================================================
// DTOs
// =============================================================================

/// Create task request DTO, forwarded as the upstream body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    #[schema(example = "Send invoice")]
    pub name: String,
    /// ISO 8601
    #[schema(example = "2025-06-30")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// User ID of the assignee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<u64>,
    /// l, m or h
    #[schema(example = "m")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_enum: Option<String>,
}

/// Edit task request DTO; absent fields are left unchanged
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct EditTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_enum: Option<String>,
}

/// Create comment request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    #[schema(example = "Done, see attachment")]
    pub content: String,
}

fn to_body<T: Serialize>(req: &T) -> Result<Value, HandlerError> {
    serde_json::to_value(req).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// List tasks of a task list
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/tasklists/{tasklist_id}/tasks",
    tag = "tasks",
    params(
        ("id" = u64, Path, description = "Freelo project ID"),
        ("tasklist_id" = u64, Path, description = "Freelo task list ID")
    ),
    responses(
        (status = 200, description = "Tasks"),
        (status = 404, description = "Task list not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_tasks<S: SessionGateway>(
    State(state): State<AppState<S>>,
    Path((project_id, tasklist_id)): Path<(u64, u64)>,
) -> Result<Json<Value>, HandlerError> {
    let tasks = state
        .freelo()
        .tasks(project_id, tasklist_id)
        .await
        .map_err(map_freelo_error)?;
    Ok(Json(tasks))
}

/// Create a task in a task list
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/tasklists/{tasklist_id}/tasks",
    tag = "tasks",
    params(
        ("id" = u64, Path, description = "Freelo project ID"),
        ("tasklist_id" = u64, Path, description = "Freelo task list ID")
    ),
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created"),
        (status = 404, description = "Task list not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_task<S: SessionGateway>(
    State(state): State<AppState<S>>,
    Path((project_id, tasklist_id)): Path<(u64, u64)>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Value>), HandlerError> {
    let body = to_body(&req)?;
    let created = state
        .freelo()
        .create_task(project_id, tasklist_id, &body)
        .await
        .map_err(map_freelo_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = u64, Path, description = "Freelo task ID")
    ),
    responses(
        (status = 200, description = "Task found"),
        (status = 404, description = "Task not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_task<S: SessionGateway>(
    State(state): State<AppState<S>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, HandlerError> {
    let task = state.freelo().task(id).await.map_err(map_freelo_error)?;
    Ok(Json(task))
}

/// Edit a task
#[utoipa::path(
    post,
    path = "/api/v1/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = u64, Path, description = "Freelo task ID")
    ),
    request_body = EditTaskRequest,
    responses(
        (status = 200, description = "Task updated"),
        (status = 404, description = "Task not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn edit_task<S: SessionGateway>(
    State(state): State<AppState<S>>,
    Path(id): Path<u64>,
    Json(req): Json<EditTaskRequest>,
) -> Result<Json<Value>, HandlerError> {
    let body = to_body(&req)?;
    let edited = state
        .freelo()
        .edit_task(id, &body)
        .await
        .map_err(map_freelo_error)?;
    Ok(Json(edited))
}

/// Finish a task
#[utoipa::path(
    post,
    path = "/api/v1/tasks/{id}/finish",
    tag = "tasks",
    params(
        ("id" = u64, Path, description = "Freelo task ID")
    ),
    responses(
        (status = 200, description = "Task finished"),
        (status = 404, description = "Task not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn finish_task<S: SessionGateway>(
    State(state): State<AppState<S>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, HandlerError> {
    let result = state
        .freelo()
        .finish_task(id)
        .await
        .map_err(map_freelo_error)?;
    Ok(Json(result))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = u64, Path, description = "Freelo task ID")
    ),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 404, description = "Task not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_task<S: SessionGateway>(
    State(state): State<AppState<S>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, HandlerError> {
    let result = state
        .freelo()
        .delete_task(id)
        .await
        .map_err(map_freelo_error)?;
    Ok(Json(result))
}

/// Comment on a task
#[utoipa::path(
    post,
    path = "/api/v1/tasks/{id}/comments",
    tag = "tasks",
    params(
        ("id" = u64, Path, description = "Freelo task ID")
    ),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created"),
        (status = 404, description = "Task not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_comment<S: SessionGateway>(
    State(state): State<AppState<S>>,
    Path(id): Path<u64>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Value>), HandlerError> {
    let created = state
        .freelo()
        .create_comment(id, &req.content)
        .await
        .map_err(map_freelo_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}
