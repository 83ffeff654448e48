//! MCP tools for subtasks.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::*, schemars,
    schemars::JsonSchema, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::mcp::server::FreeloServer;
use crate::mcp::tools::{TaskIdParams, json_result, map_freelo_error, without_nulls};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateSubtaskParams {
    #[schemars(description = "Parent task ID")]
    pub task_id: u64,
    #[schemars(description = "Subtask name")]
    pub name: String,
    #[schemars(description = "Due date, ISO 8601 (optional)")]
    pub due_date: Option<String>,
    #[schemars(description = "User ID of the assignee (optional)")]
    pub worker: Option<u64>,
}

#[tool_router(router = subtasks_router, vis = "pub(crate)")]
impl FreeloServer {
    #[tool(description = "List the subtasks of a task.")]
    pub async fn list_subtasks(
        &self,
        params: Parameters<TaskIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let subtasks = self
            .client
            .subtasks(params.0.task_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(subtasks)
    }

    #[tool(description = "Create a subtask under an existing task.")]
    pub async fn create_subtask(
        &self,
        params: Parameters<CreateSubtaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(params) = params;
        let body = without_nulls(json!({
            "name": params.name,
            "due_date": params.due_date,
            "worker": params.worker,
        }));
        let created = self
            .client
            .create_subtask(params.task_id, &body)
            .await
            .map_err(map_freelo_error)?;
        json_result(created)
    }
}
