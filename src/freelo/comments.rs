//! Comment endpoints.

use serde::Serialize;
use serde_json::{Value, json};

use super::client::FreeloClient;
use super::error::FreeloResult;

/// Query of `GET /all-comments`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommentFilter {
    /// all, task, document, file or link
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(rename = "p", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl FreeloClient {
    pub async fn create_comment(&self, task_id: u64, content: &str) -> FreeloResult<Value> {
        let body = json!({ "content": content });
        self.post(&format!("/task/{task_id}/comments"), Some(&body))
            .await
    }

    pub async fn all_comments(&self, filter: &CommentFilter) -> FreeloResult<Value> {
        self.get("/all-comments", filter).await
    }
}
