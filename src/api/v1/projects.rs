//! Project handlers.

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
use crate::freelo::NewProject;
use crate::session::SessionGateway;

/// Create project request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    /// Project name
    #[schema(example = "Website redesign")]
    pub name: String,
    /// Currency ISO code
    #[schema(example = "EUR")]
    pub currency_iso: String,
}

/// List own active projects
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "projects",
    responses(
        (status = 200, description = "Projects with their task lists"),
        (status = 502, description = "Freelo unreachable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_projects<S: SessionGateway>(
    State(state): State<AppState<S>>,
) -> Result<Json<Value>, HandlerError> {
    let projects = state.freelo().projects().await.map_err(map_freelo_error)?;
    Ok(Json(projects))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    tag = "projects",
    params(
        ("id" = u64, Path, description = "Freelo project ID")
    ),
    responses(
        (status = 200, description = "Project found"),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_project<S: SessionGateway>(
    State(state): State<AppState<S>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, HandlerError> {
    let project = state.freelo().project(id).await.map_err(map_freelo_error)?;
    Ok(Json(project))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created"),
        (status = 400, description = "Rejected by Freelo", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_project<S: SessionGateway>(
    State(state): State<AppState<S>>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Value>), HandlerError> {
    let new_project = NewProject {
        name: req.name,
        currency_iso: req.currency_iso,
    };
    let created = state
        .freelo()
        .create_project(&new_project)
        .await
        .map_err(map_freelo_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    tag = "projects",
    params(
        ("id" = u64, Path, description = "Freelo project ID")
    ),
    responses(
        (status = 200, description = "Project deleted"),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_project<S: SessionGateway>(
    State(state): State<AppState<S>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, HandlerError> {
    let result = state
        .freelo()
        .delete_project(id)
        .await
        .map_err(map_freelo_error)?;
    Ok(Json(result))
}
