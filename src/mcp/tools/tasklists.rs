//! MCP tools for Freelo task lists.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::*, schemars,
    schemars::JsonSchema, tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::freelo::{NewTasklist, Page};
use crate::mcp::server::FreeloServer;
use crate::mcp::tools::{json_result, map_freelo_error};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TasklistIdParams {
    #[schemars(description = "Freelo task list ID")]
    pub tasklist_id: u64,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListAllTasklistsParams {
    #[schemars(description = "Page number, starting at 0 (optional)")]
    pub page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTasklistParams {
    #[schemars(description = "Project the task list belongs to")]
    pub project_id: u64,
    #[schemars(description = "Task list name")]
    pub name: String,
    #[schemars(description = "Budget in minutes (optional)")]
    pub budget: Option<u64>,
}

#[tool_router(router = tasklists_router, vis = "pub(crate)")]
impl FreeloServer {
    #[tool(description = "Get a task list by ID, including its tasks.")]
    pub async fn get_tasklist(
        &self,
        params: Parameters<TasklistIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let tasklist = self
            .client
            .tasklist(params.0.tasklist_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(tasklist)
    }

    #[tool(description = "List task lists across all projects. Paginated.")]
    pub async fn list_all_tasklists(
        &self,
        params: Parameters<ListAllTasklistsParams>,
    ) -> Result<CallToolResult, McpError> {
        let tasklists = self
            .client
            .all_tasklists(Page::new(params.0.page))
            .await
            .map_err(map_freelo_error)?;
        json_result(tasklists)
    }

    #[tool(description = "Create a task list in a project.")]
    pub async fn create_tasklist(
        &self,
        params: Parameters<CreateTasklistParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(CreateTasklistParams {
            project_id,
            name,
            budget,
        }) = params;
        let created = self
            .client
            .create_tasklist(project_id, &NewTasklist { name, budget })
            .await
            .map_err(map_freelo_error)?;
        json_result(created)
    }
}
