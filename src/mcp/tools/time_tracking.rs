//! MCP tools for time tracking.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::*, schemars,
    schemars::JsonSchema, tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::freelo::StartTracking;
use crate::mcp::server::FreeloServer;
use crate::mcp::tools::{json_result, map_freelo_error};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct StartTrackingParams {
    #[schemars(description = "Task to track time on (optional)")]
    pub task_id: Option<u64>,
    #[schemars(description = "Note attached to the work report (optional)")]
    pub note: Option<String>,
}

#[tool_router(router = time_tracking_router, vis = "pub(crate)")]
impl FreeloServer {
    #[tool(description = "Start the time tracker, optionally on a task.")]
    pub async fn start_time_tracking(
        &self,
        params: Parameters<StartTrackingParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(params) = params;
        let start = StartTracking {
            task_id: params.task_id,
            note: params.note,
        };
        let result = self
            .client
            .start_tracking(&start)
            .await
            .map_err(map_freelo_error)?;
        json_result(result)
    }

    #[tool(description = "Stop the running time tracker and save the work report.")]
    pub async fn stop_time_tracking(&self) -> Result<CallToolResult, McpError> {
        let result = self.client.stop_tracking().await.map_err(map_freelo_error)?;
        json_result(result)
    }

    #[tool(description = "Show whether the time tracker is running and on what.")]
    pub async fn time_tracking_status(&self) -> Result<CallToolResult, McpError> {
        let status = self
            .client
            .tracking_status()
            .await
            .map_err(map_freelo_error)?;
        json_result(status)
    }
}
