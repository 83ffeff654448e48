//! MCP tools for users.

use rmcp::{ErrorData as McpError, model::*, tool, tool_router};

use crate::mcp::server::FreeloServer;
use crate::mcp::tools::{json_result, map_freelo_error};

#[tool_router(router = users_router, vis = "pub(crate)")]
impl FreeloServer {
    #[tool(description = "List the users you collaborate with. Use their IDs to assign tasks.")]
    pub async fn list_users(&self) -> Result<CallToolResult, McpError> {
        let users = self.client.users().await.map_err(map_freelo_error)?;
        json_result(users)
    }
}
