//! User endpoints.

use serde_json::Value;

use super::NO_QUERY;
use super::client::FreeloClient;
use super::error::FreeloResult;

impl FreeloClient {
    /// Users the account collaborates with.
    pub async fn users(&self) -> FreeloResult<Value> {
        self.get("/users", NO_QUERY).await
    }

    pub async fn project_workers(&self, project_id: u64) -> FreeloResult<Value> {
        self.get(&format!("/project/{project_id}/workers"), NO_QUERY)
            .await
    }
}
