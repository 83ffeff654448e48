//! MCP tools for Freelo tasks.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::*, schemars,
    schemars::JsonSchema, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::freelo::TaskFilter;
use crate::mcp::server::FreeloServer;
use crate::mcp::tools::{json_result, map_freelo_error, without_nulls};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TaskIdParams {
    #[schemars(description = "Freelo task ID")]
    pub task_id: u64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListTasksParams {
    #[schemars(description = "Project ID")]
    pub project_id: u64,
    #[schemars(description = "Task list ID within the project")]
    pub tasklist_id: u64,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListAllTasksParams {
    #[schemars(description = "Full-text search in task names (optional)")]
    pub search_query: Option<String>,
    #[schemars(description = "State filter: 1 = active, 2 = finished (optional)")]
    pub state_id: Option<u8>,
    #[schemars(description = "Only tasks carrying this label (optional)")]
    pub with_label: Option<String>,
    #[schemars(
        description = "Sort field: 'priority', 'name', 'date_add', 'date_edited_at' (optional)"
    )]
    pub order_by: Option<String>,
    #[schemars(description = "Sort direction: 'asc' or 'desc' (optional)")]
    pub order: Option<String>,
    #[schemars(description = "Page number, starting at 0 (optional)")]
    pub page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTaskParams {
    #[schemars(description = "Project ID")]
    pub project_id: u64,
    #[schemars(description = "Task list ID the task is created in")]
    pub tasklist_id: u64,
    #[schemars(description = "Task name")]
    pub name: String,
    #[schemars(description = "Due date, ISO 8601 (optional)")]
    pub due_date: Option<String>,
    #[schemars(description = "User ID of the assignee (optional)")]
    pub worker: Option<u64>,
    #[schemars(description = "Priority: 'l' (low), 'm' (medium), 'h' (high) (optional)")]
    pub priority_enum: Option<String>,
    #[schemars(description = "Description posted as the first comment (optional)")]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EditTaskParams {
    #[schemars(description = "Task ID to edit")]
    pub task_id: u64,
    #[schemars(description = "New task name (optional)")]
    pub name: Option<String>,
    #[schemars(description = "New due date, ISO 8601 (optional)")]
    pub due_date: Option<String>,
    #[schemars(description = "User ID of the new assignee (optional)")]
    pub worker: Option<u64>,
    #[schemars(description = "Priority: 'l', 'm' or 'h' (optional)")]
    pub priority_enum: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MoveTaskParams {
    #[schemars(description = "Task ID to move")]
    pub task_id: u64,
    #[schemars(description = "Destination task list ID")]
    pub tasklist_id: u64,
}

// =============================================================================
// Task Tools
// =============================================================================

#[tool_router(router = tasks_router, vis = "pub(crate)")]
impl FreeloServer {
    #[tool(description = "List the tasks of one task list.")]
    pub async fn list_tasks(
        &self,
        params: Parameters<ListTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        let tasks = self
            .client
            .tasks(params.0.project_id, params.0.tasklist_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(tasks)
    }

    #[tool(
        description = "Search tasks across all projects. Filter by text, state or label; sort and paginate."
    )]
    pub async fn list_all_tasks(
        &self,
        params: Parameters<ListAllTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(params) = params;
        let filter = TaskFilter {
            search_query: params.search_query,
            state_id: params.state_id,
            with_label: params.with_label,
            order_by: params.order_by,
            order: params.order,
            page: params.page,
        };
        let tasks = self
            .client
            .all_tasks(&filter)
            .await
            .map_err(map_freelo_error)?;
        json_result(tasks)
    }

    #[tool(description = "Get a task by ID with its description, assignee, labels and dates.")]
    pub async fn get_task(
        &self,
        params: Parameters<TaskIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let task = self
            .client
            .task(params.0.task_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(task)
    }

    #[tool(description = "Create a task in a task list.")]
    pub async fn create_task(
        &self,
        params: Parameters<CreateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(params) = params;
        let body = without_nulls(json!({
            "name": params.name,
            "due_date": params.due_date,
            "worker": params.worker,
            "priority_enum": params.priority_enum,
            "comment": params.comment.map(|content| json!({ "content": content })),
        }));
        let created = self
            .client
            .create_task(params.project_id, params.tasklist_id, &body)
            .await
            .map_err(map_freelo_error)?;
        json_result(created)
    }

    #[tool(description = "Edit a task. Only the fields provided are changed.")]
    pub async fn edit_task(
        &self,
        params: Parameters<EditTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(params) = params;
        let body = without_nulls(json!({
            "name": params.name,
            "due_date": params.due_date,
            "worker": params.worker,
            "priority_enum": params.priority_enum,
        }));
        let edited = self
            .client
            .edit_task(params.task_id, &body)
            .await
            .map_err(map_freelo_error)?;
        json_result(edited)
    }

    #[tool(description = "Mark a task as finished.")]
    pub async fn finish_task(
        &self,
        params: Parameters<TaskIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .finish_task(params.0.task_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(result)
    }

    #[tool(description = "Reopen a finished task.")]
    pub async fn activate_task(
        &self,
        params: Parameters<TaskIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .activate_task(params.0.task_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(result)
    }

    #[tool(description = "Move a task to another task list.")]
    pub async fn move_task(
        &self,
        params: Parameters<MoveTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .move_task(params.0.task_id, params.0.tasklist_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(result)
    }

    #[tool(description = "Delete a task permanently.")]
    pub async fn delete_task(
        &self,
        params: Parameters<TaskIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .delete_task(params.0.task_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(result)
    }
}
