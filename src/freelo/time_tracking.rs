//! Time tracking endpoints.

use serde::Serialize;
use serde_json::Value;

use super::NO_QUERY;
use super::client::FreeloClient;
use super::error::FreeloResult;

/// Body of `POST /timetracking/start`. Both fields are optional upstream.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StartTracking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FreeloClient {
    pub async fn start_tracking(&self, start: &StartTracking) -> FreeloResult<Value> {
        let body = serde_json::to_value(start)?;
        self.post("/timetracking/start", Some(&body)).await
    }

    pub async fn stop_tracking(&self) -> FreeloResult<Value> {
        self.post("/timetracking/stop", None).await
    }

    pub async fn tracking_status(&self) -> FreeloResult<Value> {
        self.get("/timetracking/status", NO_QUERY).await
    }
}
