//! API route configuration.

use axum::Router;
use axum::routing::{any, delete, get, post};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, ErrorResponse, HealthResponse};
use super::state::AppState;
use super::v1::{
    self, CreateCommentRequest, CreateProjectRequest, CreateTaskRequest, CreateTasklistRequest,
    EditTaskRequest,
};
use crate::mcp::transport::MESSAGE_PATH;
use crate::session::SessionGateway;

/// Build routes with generic transport factory type.
///
/// Applies the turbofish to every handler so routes can be registered
/// without repeating `::<S>`.
macro_rules! routes {
    ($S:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$S>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Freelo MCP API",
        version = "0.1.0",
        description = "MCP gateway and REST façade for the Freelo project management API",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        v1::list_projects,
        v1::get_project,
        v1::create_project,
        v1::delete_project,
        v1::get_tasklist,
        v1::create_tasklist,
        v1::list_tasks,
        v1::create_task,
        v1::get_task,
        v1::edit_task,
        v1::finish_task,
        v1::delete_task,
        v1::create_comment,
        v1::list_users,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            CreateProjectRequest,
            CreateTasklistRequest,
            CreateTaskRequest,
            EditTaskRequest,
            CreateCommentRequest,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "projects", description = "Freelo projects"),
        (name = "tasklists", description = "Freelo task lists"),
        (name = "tasks", description = "Freelo tasks and their comments"),
        (name = "users", description = "Freelo users")
    )
)]
pub struct ApiDoc;

/// Health, the REST façade and the docs, shared by both HTTP servers.
fn common_routes<S: SessionGateway>() -> Router<AppState<S>> {
    let system_routes = routes!(S => {
        get "/health" => handlers::health,
    });

    let v1_routes = routes!(S => {
        get "/projects" => v1::list_projects,
        post "/projects" => v1::create_project,
        get "/projects/{id}" => v1::get_project,
        delete "/projects/{id}" => v1::delete_project,
        post "/projects/{id}/tasklists" => v1::create_tasklist,
        get "/projects/{id}/tasklists/{tasklist_id}/tasks" => v1::list_tasks,
        post "/projects/{id}/tasklists/{tasklist_id}/tasks" => v1::create_task,
        get "/tasklists/{id}" => v1::get_tasklist,
        get "/tasks/{id}" => v1::get_task,
        post "/tasks/{id}" => v1::edit_task,
        delete "/tasks/{id}" => v1::delete_task,
        post "/tasks/{id}/finish" => v1::finish_task,
        post "/tasks/{id}/comments" => v1::create_comment,
        get "/users" => v1::list_users,
    });

    system_routes
        .nest("/api/v1", v1_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}

/// Router for the Streamable HTTP server: MCP at `/mcp/v1/endpoint`.
pub fn streamable_router<S: SessionGateway>(state: AppState<S>) -> Router {
    common_routes::<S>()
        .route("/mcp/v1/endpoint", any(handlers::mcp_endpoint::<S>))
        .with_state(state)
}

/// Router for the legacy SSE server: stream at `/sse`, client messages at
/// `/message`.
pub fn sse_router<S: SessionGateway>(state: AppState<S>) -> Router {
    common_routes::<S>()
        .route("/sse", get(handlers::mcp_endpoint::<S>))
        .route(MESSAGE_PATH, post(handlers::mcp_endpoint::<S>))
        .with_state(state)
}
