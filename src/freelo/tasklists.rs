//! Task list endpoints.

use serde::Serialize;
use serde_json::Value;

use super::client::FreeloClient;
use super::error::FreeloResult;
use super::{NO_QUERY, Page};

/// Body of `POST /project/{id}/tasklists`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTasklist {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
}

impl FreeloClient {
    pub async fn tasklist(&self, tasklist_id: u64) -> FreeloResult<Value> {
        self.get(&format!("/tasklist/{tasklist_id}"), NO_QUERY)
            .await
    }

    pub async fn all_tasklists(&self, page: Page) -> FreeloResult<Value> {
        self.get("/all-tasklists", &page).await
    }

    pub async fn create_tasklist(
        &self,
        project_id: u64,
        tasklist: &NewTasklist,
    ) -> FreeloResult<Value> {
        let body = serde_json::to_value(tasklist)?;
        self.post(&format!("/project/{project_id}/tasklists"), Some(&body))
            .await
    }
}
