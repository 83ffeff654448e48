//! Shared helpers for tests: an in-process stand-in for the Freelo API.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::config::Credentials;
use crate::freelo::FreeloClient;

pub fn test_credentials() -> Credentials {
    Credentials::new("dev@example.com", "api-key", "freelo-mcp-tests (dev@example.com)")
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Fake Freelo that echoes each request back as JSON.
///
/// Paths containing `/404` answer with a Freelo-style not-found error,
/// paths containing `/500` with a plain-text server error and paths
/// containing `/empty` with an empty 200.
pub async fn fake_freelo() -> Arc<FreeloClient> {
    let base_url = spawn_server(Router::new().fallback(echo)).await;
    Arc::new(FreeloClient::with_base_url(test_credentials(), base_url).unwrap())
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let path = uri.path().to_string();

    if path.contains("/404") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"errors": ["Resource not found"]})),
        )
            .into_response();
    }
    if path.contains("/500") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    if path.contains("/empty") {
        return StatusCode::OK.into_response();
    }

    let header = |name| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    Json(json!({
        "method": method.as_str(),
        "path": path,
        "query": uri.query(),
        "authorization": header(header::AUTHORIZATION),
        "user_agent": header(header::USER_AGENT),
        "body": body,
    }))
    .into_response()
}
