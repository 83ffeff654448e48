//! MCP server implementation
//!
//! [`FreeloServer`] is the per-session handler: it owns the tool router and a
//! shared upstream client. Tools live in [`super::tools`], one router per
//! Freelo area.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::freelo::FreeloClient;

/// Freelo MCP tool server.
///
/// Cheap to clone; every session gets its own instance over the same
/// [`FreeloClient`].
#[derive(Clone)]
pub struct FreeloServer {
    pub(crate) client: Arc<FreeloClient>,
    tool_router: ToolRouter<Self>,
}

impl FreeloServer {
    pub fn new(client: Arc<FreeloClient>) -> Self {
        Self {
            client,
            tool_router: Self::projects_router()
                + Self::tasklists_router()
                + Self::tasks_router()
                + Self::subtasks_router()
                + Self::comments_router()
                + Self::users_router()
                + Self::time_tracking_router(),
        }
    }

    /// Get the combined tool router
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for FreeloServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "Freelo MCP Server - Manage Freelo projects, task lists, tasks, subtasks, comments, users and time tracking",
        )
    }
}
