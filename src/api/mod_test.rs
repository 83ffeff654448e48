use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::{AppState, Config, sse_router, streamable_router};
use crate::mcp::{create_sse_manager, create_streamable_manager};
use crate::session::SessionGateway;
use crate::test_support::fake_freelo;

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[test]
fn config_defaults_to_all_interfaces_on_3000() {
    let config = Config::default();
    assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(config.port, 3000);
    assert_eq!(config.addr(), SocketAddr::from(([0, 0, 0, 0], 3000)));
}

#[test]
fn config_addr_combines_host_and_port() {
    let config = Config {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 8080,
    };
    assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
}

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_streamable_transport() {
    let client = fake_freelo().await;
    let app = streamable_router(AppState::new(
        create_streamable_manager(client.clone()),
        client,
    ));

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], env!("CARGO_PKG_NAME"));
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["transport"], "streamable-http");
    assert_eq!(body["sessions"], 0);
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_sse_transport() {
    let client = fake_freelo().await;
    let app = sse_router(AppState::new(create_sse_manager(client.clone()), client));

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["transport"], "sse");
    assert_eq!(body["sessions"], 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn health_counts_live_sessions() {
    let client = fake_freelo().await;
    let sessions = create_streamable_manager(client.clone());
    let app = streamable_router(AppState::new(sessions.clone(), client));

    let initialize = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2025-03-26",
            "capabilities": {},
            "clientInfo": {"name": "test", "version": "1.0"}
        }
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp/v1/endpoint")
                .header(header::HOST, "localhost:3000")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ACCEPT, "application/json, text/event-stream")
                .body(Body::from(initialize.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("mcp-session-id"));

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(json_body(response).await["sessions"], 1);
    assert_eq!(sessions.session_count(), 1);

    sessions.shutdown().await;
    assert_eq!(sessions.session_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn docs_are_served() {
    let client = fake_freelo().await;
    let app = streamable_router(AppState::new(
        create_streamable_manager(client.clone()),
        client,
    ));

    let response = app.oneshot(get("/docs")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn openapi_lists_rest_paths() {
    use utoipa::OpenApi;

    let doc = super::ApiDoc::openapi();
    for path in [
        "/health",
        "/api/v1/projects",
        "/api/v1/projects/{id}",
        "/api/v1/projects/{id}/tasklists",
        "/api/v1/projects/{id}/tasklists/{tasklist_id}/tasks",
        "/api/v1/tasklists/{id}",
        "/api/v1/tasks/{id}",
        "/api/v1/tasks/{id}/finish",
        "/api/v1/tasks/{id}/comments",
        "/api/v1/users",
    ] {
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}

#[test]
fn openapi_license_matches_package() {
    use utoipa::OpenApi;

    let doc = super::ApiDoc::openapi();
    let license = doc.info.license.expect("license should be documented");
    assert_eq!(license.name, env!("CARGO_PKG_LICENSE"));
    assert_eq!(license.name, "GPL-2.0");
}

#[tokio::test(flavor = "multi_thread")]
async fn sse_message_without_session_is_not_found() {
    let client = fake_freelo().await;
    let sessions = create_sse_manager(client.clone());
    let app = sse_router(AppState::new(sessions.clone(), client));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/message?sessionId=nope")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(sessions.session_count(), 0);
}
