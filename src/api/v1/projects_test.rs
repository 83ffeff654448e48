//! Router tests for project, task list and user endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, streamable_router};
use crate::mcp::create_streamable_manager;
use crate::test_support::fake_freelo;

/// App wired to the echoing fake Freelo
async fn test_app() -> axum::Router {
    let client = fake_freelo().await;
    let state = AppState::new(create_streamable_manager(client.clone()), client);
    streamable_router(state)
}

/// Helper to parse JSON response body
async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Projects
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn list_projects_forwards_to_upstream() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/v1/projects")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["method"], "GET");
    assert_eq!(body["path"], "/projects");
    assert!(
        body["authorization"]
            .as_str()
            .unwrap()
            .starts_with("Basic ")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn get_project_by_id() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/v1/projects/42")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["path"], "/project/42");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_project_passes_upstream_not_found_through() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/v1/projects/404")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("404"));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_project_rejects_non_numeric_id() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/v1/projects/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_project_returns_created() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/v1/projects",
            json!({"name": "Website", "currency_iso": "EUR"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["method"], "POST");
    assert_eq!(body["path"], "/projects");
    assert_eq!(body["body"]["name"], "Website");
    assert_eq!(body["body"]["currency_iso"], "EUR");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_project_missing_field_is_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json("/api/v1/projects", json!({"name": "Website"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_project_uses_delete() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/projects/5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["method"], "DELETE");
    assert_eq!(body["path"], "/project/5");
}

// =============================================================================
// Task lists and users
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn get_tasklist_by_id() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/v1/tasklists/8")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["path"], "/tasklist/8");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_tasklist_in_project() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/v1/projects/3/tasklists",
            json!({"name": "Backlog", "budget": 600}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["path"], "/project/3/tasklists");
    assert_eq!(body["body"]["name"], "Backlog");
    assert_eq!(body["body"]["budget"], 600);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_users_forwards_to_upstream() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/v1/users")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["path"], "/users");
}
