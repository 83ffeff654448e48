//! MCP tools for task comments.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::*, schemars,
    schemars::JsonSchema, tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::freelo::CommentFilter;
use crate::mcp::server::FreeloServer;
use crate::mcp::tools::{json_result, map_freelo_error};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateCommentParams {
    #[schemars(description = "Task ID to comment on")]
    pub task_id: u64,
    #[schemars(description = "Comment text (HTML allowed)")]
    pub content: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListCommentsParams {
    #[schemars(
        description = "Comment type: 'all', 'task', 'document', 'file' or 'link' (optional)"
    )]
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[schemars(description = "Sort direction: 'asc' or 'desc' (optional)")]
    pub order: Option<String>,
    #[schemars(description = "Page number, starting at 0 (optional)")]
    pub page: Option<u32>,
}

#[tool_router(router = comments_router, vis = "pub(crate)")]
impl FreeloServer {
    #[tool(description = "Add a comment to a task.")]
    pub async fn create_comment(
        &self,
        params: Parameters<CreateCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        let comment = self
            .client
            .create_comment(params.0.task_id, &params.0.content)
            .await
            .map_err(map_freelo_error)?;
        json_result(comment)
    }

    #[tool(description = "List comments across all projects. Paginated.")]
    pub async fn list_all_comments(
        &self,
        params: Parameters<ListCommentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(params) = params;
        let filter = CommentFilter {
            kind: params.kind,
            order: params.order,
            page: params.page,
        };
        let comments = self
            .client
            .all_comments(&filter)
            .await
            .map_err(map_freelo_error)?;
        json_result(comments)
    }
}
