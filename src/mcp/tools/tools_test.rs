//! Tests for task list, comment, user and time tracking tools, and for the
//! shared error mapping.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ErrorCode, RawContent};
use serde_json::{Value, json};

use crate::freelo::FreeloError;
use crate::mcp::server::FreeloServer;
use crate::mcp::tools::{
    CreateCommentParams, CreateTasklistParams, ListAllTasklistsParams, ListCommentsParams,
    StartTrackingParams, TasklistIdParams, map_freelo_error, without_nulls,
};
use crate::test_support::fake_freelo;

async fn server() -> FreeloServer {
    FreeloServer::new(fake_freelo().await)
}

fn echoed(result: &CallToolResult) -> Value {
    match &result.content[0].raw {
        RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
        _ => panic!("Expected text content"),
    }
}

fn api_error(status: u16) -> FreeloError {
    FreeloError::Api {
        status,
        message: "upstream said no".to_string(),
        body: None,
    }
}

#[tokio::test]
async fn test_tasklist_tools() {
    let server = server().await;

    let fetched = server
        .get_tasklist(Parameters(TasklistIdParams { tasklist_id: 12 }))
        .await
        .unwrap();
    assert_eq!(echoed(&fetched)["path"], "/tasklist/12");

    let listed = server
        .list_all_tasklists(Parameters(ListAllTasklistsParams { page: Some(1) }))
        .await
        .unwrap();
    let echo = echoed(&listed);
    assert_eq!(echo["path"], "/all-tasklists");
    assert_eq!(echo["query"], "p=1");

    let created = server
        .create_tasklist(Parameters(CreateTasklistParams {
            project_id: 3,
            name: "Backlog".to_string(),
            budget: None,
        }))
        .await
        .unwrap();
    let echo = echoed(&created);
    assert_eq!(echo["path"], "/project/3/tasklists");
    assert_eq!(echo["body"], json!({"name": "Backlog"}));
}

#[tokio::test]
async fn test_comment_tools() {
    let server = server().await;

    let created = server
        .create_comment(Parameters(CreateCommentParams {
            task_id: 9,
            content: "Looks good".to_string(),
        }))
        .await
        .unwrap();
    let echo = echoed(&created);
    assert_eq!(echo["path"], "/task/9/comments");
    assert_eq!(echo["body"]["content"], "Looks good");

    let listed = server
        .list_all_comments(Parameters(ListCommentsParams {
            kind: Some("task".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    let echo = echoed(&listed);
    assert_eq!(echo["path"], "/all-comments");
    assert_eq!(echo["query"], "type=task");
}

#[tokio::test]
async fn test_list_users() {
    let server = server().await;

    let result = server.list_users().await.unwrap();

    assert_eq!(echoed(&result)["path"], "/users");
}

#[tokio::test]
async fn test_time_tracking_tools() {
    let server = server().await;

    let started = server
        .start_time_tracking(Parameters(StartTrackingParams {
            task_id: Some(4),
            note: None,
        }))
        .await
        .unwrap();
    let echo = echoed(&started);
    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["path"], "/timetracking/start");
    assert_eq!(echo["body"], json!({"task_id": 4}));

    let stopped = server.stop_time_tracking().await.unwrap();
    assert_eq!(echoed(&stopped)["path"], "/timetracking/stop");

    let status = server.time_tracking_status().await.unwrap();
    let echo = echoed(&status);
    assert_eq!(echo["method"], "GET");
    assert_eq!(echo["path"], "/timetracking/status");
}

#[test]
fn test_error_mapping_by_status() {
    assert_eq!(map_freelo_error(api_error(404)).code, ErrorCode::RESOURCE_NOT_FOUND);
    assert_eq!(map_freelo_error(api_error(400)).code, ErrorCode::INVALID_PARAMS);
    assert_eq!(map_freelo_error(api_error(422)).code, ErrorCode::INVALID_PARAMS);
    assert_eq!(map_freelo_error(api_error(401)).code, ErrorCode::INVALID_REQUEST);
    assert_eq!(map_freelo_error(api_error(403)).code, ErrorCode::INVALID_REQUEST);
    assert_eq!(map_freelo_error(api_error(502)).code, ErrorCode::INTERNAL_ERROR);

    let invalid = FreeloError::InvalidResponse {
        message: "not json".to_string(),
    };
    let err = map_freelo_error(invalid);
    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert_eq!(err.data.unwrap()["status"], Value::Null);
}

#[test]
fn test_error_data_carries_upstream_message() {
    let err = map_freelo_error(api_error(422));

    let data = err.data.unwrap();
    assert_eq!(data["status"], 422);
    assert_eq!(data["error"], "Freelo API error (422): upstream said no");
}

#[test]
fn test_without_nulls() {
    let value = without_nulls(json!({"a": 1, "b": null, "c": {"d": null}}));
    assert_eq!(value, json!({"a": 1, "c": {"d": null}}));
    assert_eq!(without_nulls(json!([null])), json!([null]));
}
