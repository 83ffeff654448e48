//! Tests for the Freelo MCP server

use rmcp::ServerHandler;

use super::server::FreeloServer;
use crate::test_support::fake_freelo;

const EXPECTED_TOOLS: &[&str] = &[
    "list_projects",
    "list_all_projects",
    "get_project",
    "create_project",
    "archive_project",
    "activate_project",
    "delete_project",
    "list_project_workers",
    "get_tasklist",
    "list_all_tasklists",
    "create_tasklist",
    "list_tasks",
    "list_all_tasks",
    "get_task",
    "create_task",
    "edit_task",
    "finish_task",
    "activate_task",
    "move_task",
    "delete_task",
    "list_subtasks",
    "create_subtask",
    "create_comment",
    "list_all_comments",
    "list_users",
    "start_time_tracking",
    "stop_time_tracking",
    "time_tracking_status",
];

#[tokio::test]
async fn test_server_info() {
    let server = FreeloServer::new(fake_freelo().await);

    let info = server.get_info();

    assert!(info.capabilities.tools.is_some());
    assert!(info.instructions.unwrap().contains("Freelo"));
}

#[tokio::test]
async fn test_router_registers_every_tool() {
    let server = FreeloServer::new(fake_freelo().await);

    let mut names: Vec<String> = server
        .router()
        .list_all()
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();
    names.sort();

    let mut expected: Vec<String> = EXPECTED_TOOLS.iter().map(|s| s.to_string()).collect();
    expected.sort();

    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_tool_schemas_expose_parameters() {
    let server = FreeloServer::new(fake_freelo().await);
    let tools = server.router().list_all();

    let create_task = tools
        .iter()
        .find(|tool| tool.name == "create_task")
        .unwrap();
    let properties = create_task.input_schema.get("properties").unwrap();
    for field in ["project_id", "tasklist_id", "name", "due_date", "worker"] {
        assert!(properties.get(field).is_some(), "missing {field}");
    }

    let required = create_task.input_schema.get("required").unwrap();
    assert!(required.as_array().unwrap().iter().any(|v| v == "name"));
}
