//! MCP tool implementations
//!
//! Tools are grouped by Freelo area, one `#[tool_router]` impl block per
//! module, all on [`FreeloServer`](super::FreeloServer). The server sums the
//! routers at construction.

mod comments;
mod projects;
mod subtasks;
mod tasklists;
mod tasks;
mod time_tracking;
mod users;

#[cfg(test)]
mod tasks_test;
#[cfg(test)]
mod tools_test;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde_json::{Value, json};

use crate::freelo::FreeloError;

pub use comments::{CreateCommentParams, ListCommentsParams};
pub use projects::{CreateProjectParams, ListAllProjectsParams, ProjectIdParams};
pub use subtasks::CreateSubtaskParams;
pub use tasklists::{CreateTasklistParams, ListAllTasklistsParams, TasklistIdParams};
pub use tasks::{
    CreateTaskParams, EditTaskParams, ListAllTasksParams, ListTasksParams, MoveTaskParams,
    TaskIdParams,
};
pub use time_tracking::StartTrackingParams;

/// Map an upstream failure onto the closest MCP error.
pub(crate) fn map_freelo_error(e: FreeloError) -> McpError {
    let data = Some(json!({
        "status": e.status(),
        "error": e.to_string(),
    }));

    match e.status() {
        Some(404) => McpError::resource_not_found("freelo_not_found", data),
        Some(400) | Some(422) => McpError::invalid_params("freelo_invalid_params", data),
        Some(401) | Some(403) => McpError::invalid_request("freelo_unauthorized", data),
        _ => McpError::internal_error("freelo_error", data),
    }
}

/// Upstream JSON as pretty-printed text content.
pub(crate) fn json_result(value: Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(&value).map_err(|e| {
        McpError::internal_error(
            "serialization_failed",
            Some(json!({"error": e.to_string()})),
        )
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Drop `null` members so optional tool arguments are left out of the
/// upstream body.
pub(crate) fn without_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        other => other,
    }
}
