//! MCP tools for Freelo projects.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::*, schemars,
    schemars::JsonSchema, tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::freelo::{NewProject, Page};
use crate::mcp::server::FreeloServer;
use crate::mcp::tools::{json_result, map_freelo_error};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProjectIdParams {
    #[schemars(description = "Freelo project ID")]
    pub project_id: u64,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListAllProjectsParams {
    #[schemars(description = "Page number, starting at 0 (optional)")]
    pub page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateProjectParams {
    #[schemars(description = "Project name")]
    pub name: String,
    #[schemars(description = "Currency ISO code, e.g. 'CZK', 'EUR', 'USD'")]
    pub currency_iso: String,
}

// =============================================================================
// Project Tools
// =============================================================================

#[tool_router(router = projects_router, vis = "pub(crate)")]
impl FreeloServer {
    #[tool(description = "List your own active projects together with their task lists.")]
    pub async fn list_projects(&self) -> Result<CallToolResult, McpError> {
        let projects = self.client.projects().await.map_err(map_freelo_error)?;
        json_result(projects)
    }

    #[tool(
        description = "List every project you can see (own and shared, active and archived). Paginated."
    )]
    pub async fn list_all_projects(
        &self,
        params: Parameters<ListAllProjectsParams>,
    ) -> Result<CallToolResult, McpError> {
        let projects = self
            .client
            .all_projects(Page::new(params.0.page))
            .await
            .map_err(map_freelo_error)?;
        json_result(projects)
    }

    #[tool(description = "Get a project by ID, including its task lists.")]
    pub async fn get_project(
        &self,
        params: Parameters<ProjectIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let project = self
            .client
            .project(params.0.project_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(project)
    }

    #[tool(description = "Create a new project.")]
    pub async fn create_project(
        &self,
        params: Parameters<CreateProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let new_project = NewProject {
            name: params.0.name,
            currency_iso: params.0.currency_iso,
        };
        let created = self
            .client
            .create_project(&new_project)
            .await
            .map_err(map_freelo_error)?;
        json_result(created)
    }

    #[tool(description = "Archive a project. Archived projects can be activated again.")]
    pub async fn archive_project(
        &self,
        params: Parameters<ProjectIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .archive_project(params.0.project_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(result)
    }

    #[tool(description = "Activate an archived project.")]
    pub async fn activate_project(
        &self,
        params: Parameters<ProjectIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .activate_project(params.0.project_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(result)
    }

    #[tool(description = "Delete a project permanently. This cannot be undone.")]
    pub async fn delete_project(
        &self,
        params: Parameters<ProjectIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .delete_project(params.0.project_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(result)
    }

    #[tool(description = "List the workers (members) of a project.")]
    pub async fn list_project_workers(
        &self,
        params: Parameters<ProjectIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let workers = self
            .client
            .project_workers(params.0.project_id)
            .await
            .map_err(map_freelo_error)?;
        json_result(workers)
    }
}
