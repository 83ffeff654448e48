//! Tests for task and subtask MCP tools

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;

use crate::mcp::server::FreeloServer;
use crate::mcp::tools::{
    CreateSubtaskParams, CreateTaskParams, EditTaskParams, ListAllTasksParams, ListTasksParams,
    MoveTaskParams, TaskIdParams,
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

#[tokio::test]
async fn test_list_tasks_in_tasklist() {
    let server = server().await;

    let result = server
        .list_tasks(Parameters(ListTasksParams {
            project_id: 1,
            tasklist_id: 2,
        }))
        .await
        .unwrap();

    assert_eq!(echoed(&result)["path"], "/project/1/tasklist/2/tasks");
}

#[tokio::test]
async fn test_list_all_tasks_forwards_filters() {
    let server = server().await;

    let result = server
        .list_all_tasks(Parameters(ListAllTasksParams {
            search_query: Some("invoice".to_string()),
            state_id: Some(1),
            order_by: Some("priority".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();

    let echo = echoed(&result);
    assert_eq!(echo["path"], "/all-tasks");
    assert_eq!(
        echo["query"],
        "search_query=invoice&state_id=1&order_by=priority"
    );
}

#[tokio::test]
async fn test_create_task_omits_absent_fields() {
    let server = server().await;

    let result = server
        .create_task(Parameters(CreateTaskParams {
            project_id: 1,
            tasklist_id: 2,
            name: "Send invoice".to_string(),
            due_date: None,
            worker: Some(99),
            priority_enum: None,
            comment: Some("Before Friday".to_string()),
        }))
        .await
        .unwrap();

    let echo = echoed(&result);
    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["path"], "/project/1/tasklist/2/tasks");

    let body = echo["body"].as_object().unwrap();
    assert_eq!(body["name"], "Send invoice");
    assert_eq!(body["worker"], 99);
    assert_eq!(body["comment"]["content"], "Before Friday");
    assert!(!body.contains_key("due_date"));
    assert!(!body.contains_key("priority_enum"));
}

#[tokio::test]
async fn test_edit_task_sends_only_changes() {
    let server = server().await;

    let result = server
        .edit_task(Parameters(EditTaskParams {
            task_id: 5,
            name: Some("Renamed".to_string()),
            due_date: None,
            worker: None,
            priority_enum: Some("h".to_string()),
        }))
        .await
        .unwrap();

    let echo = echoed(&result);
    assert_eq!(echo["path"], "/task/5");
    let body = echo["body"].as_object().unwrap();
    assert_eq!(body.len(), 2);
    assert_eq!(body["priority_enum"], "h");
}

#[tokio::test]
async fn test_task_state_transitions() {
    let server = server().await;

    let finished = server
        .finish_task(Parameters(TaskIdParams { task_id: 5 }))
        .await
        .unwrap();
    assert_eq!(echoed(&finished)["path"], "/task/5/finish");

    let activated = server
        .activate_task(Parameters(TaskIdParams { task_id: 5 }))
        .await
        .unwrap();
    assert_eq!(echoed(&activated)["path"], "/task/5/activate");
}

#[tokio::test]
async fn test_move_and_delete_task() {
    let server = server().await;

    let moved = server
        .move_task(Parameters(MoveTaskParams {
            task_id: 5,
            tasklist_id: 8,
        }))
        .await
        .unwrap();
    assert_eq!(echoed(&moved)["path"], "/task/5/move/8");

    let deleted = server
        .delete_task(Parameters(TaskIdParams { task_id: 5 }))
        .await
        .unwrap();
    let echo = echoed(&deleted);
    assert_eq!(echo["method"], "DELETE");
    assert_eq!(echo["path"], "/task/5");
}

#[tokio::test]
async fn test_get_task() {
    let server = server().await;

    let result = server
        .get_task(Parameters(TaskIdParams { task_id: 11 }))
        .await
        .unwrap();

    assert_eq!(echoed(&result)["path"], "/task/11");
}

#[tokio::test]
async fn test_subtasks() {
    let server = server().await;

    let listed = server
        .list_subtasks(Parameters(TaskIdParams { task_id: 5 }))
        .await
        .unwrap();
    assert_eq!(echoed(&listed)["path"], "/task/5/subtasks");

    let created = server
        .create_subtask(Parameters(CreateSubtaskParams {
            task_id: 5,
            name: "Draft".to_string(),
            due_date: None,
            worker: None,
        }))
        .await
        .unwrap();
    let echo = echoed(&created);
    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["path"], "/task/5/subtasks");
    assert_eq!(echo["body"], serde_json::json!({"name": "Draft"}));
}
