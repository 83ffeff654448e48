//! Task and subtask endpoints.

use serde::Serialize;
use serde_json::Value;

use super::NO_QUERY;
use super::client::FreeloClient;
use super::error::FreeloResult;

/// Query of `GET /all-tasks`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    /// 1 = active, 2 = finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(rename = "p", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl FreeloClient {
    pub async fn tasks(&self, project_id: u64, tasklist_id: u64) -> FreeloResult<Value> {
        self.get(
            &format!("/project/{project_id}/tasklist/{tasklist_id}/tasks"),
            NO_QUERY,
        )
        .await
    }

    pub async fn all_tasks(&self, filter: &TaskFilter) -> FreeloResult<Value> {
        self.get("/all-tasks", filter).await
    }

    pub async fn task(&self, task_id: u64) -> FreeloResult<Value> {
        self.get(&format!("/task/{task_id}"), NO_QUERY).await
    }

    /// Create a task. `body` is forwarded as-is (name, due_date, worker,
    /// priority_enum, labels, comment...).
    pub async fn create_task(
        &self,
        project_id: u64,
        tasklist_id: u64,
        body: &Value,
    ) -> FreeloResult<Value> {
        self.post(
            &format!("/project/{project_id}/tasklist/{tasklist_id}/tasks"),
            Some(body),
        )
        .await
    }

    pub async fn edit_task(&self, task_id: u64, body: &Value) -> FreeloResult<Value> {
        self.post(&format!("/task/{task_id}"), Some(body)).await
    }

    pub async fn finish_task(&self, task_id: u64) -> FreeloResult<Value> {
        self.post(&format!("/task/{task_id}/finish"), None).await
    }

    pub async fn activate_task(&self, task_id: u64) -> FreeloResult<Value> {
        self.post(&format!("/task/{task_id}/activate"), None).await
    }

    pub async fn move_task(&self, task_id: u64, tasklist_id: u64) -> FreeloResult<Value> {
        self.post(&format!("/task/{task_id}/move/{tasklist_id}"), None)
            .await
    }

    pub async fn delete_task(&self, task_id: u64) -> FreeloResult<Value> {
        self.delete(&format!("/task/{task_id}")).await
    }

    pub async fn subtasks(&self, task_id: u64) -> FreeloResult<Value> {
        self.get(&format!("/task/{task_id}/subtasks"), NO_QUERY)
            .await
    }

    pub async fn create_subtask(&self, task_id: u64, body: &Value) -> FreeloResult<Value> {
        self.post(&format!("/task/{task_id}/subtasks"), Some(body))
            .await
    }
}
