//! Project endpoints.

use serde::Serialize;
use serde_json::Value;

use super::client::FreeloClient;
use super::error::FreeloResult;
use super::{NO_QUERY, Page};

/// Body of `POST /projects`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub name: String,
    /// ISO 4217 code: CZK, EUR or USD.
    pub currency_iso: String,
}

impl FreeloClient {
    /// Own active projects, including their task lists.
    pub async fn projects(&self) -> FreeloResult<Value> {
        self.get("/projects", NO_QUERY).await
    }

    /// Every project the user can see (owned, invited, archived), paginated.
    pub async fn all_projects(&self, page: Page) -> FreeloResult<Value> {
        self.get("/all-projects", &page).await
    }

    pub async fn project(&self, project_id: u64) -> FreeloResult<Value> {
        self.get(&format!("/project/{project_id}"), NO_QUERY).await
    }

    pub async fn create_project(&self, project: &NewProject) -> FreeloResult<Value> {
        let body = serde_json::to_value(project)?;
        self.post("/projects", Some(&body)).await
    }

    pub async fn archive_project(&self, project_id: u64) -> FreeloResult<Value> {
        self.post(&format!("/project/{project_id}/archive"), None)
            .await
    }

    pub async fn activate_project(&self, project_id: u64) -> FreeloResult<Value> {
        self.post(&format!("/project/{project_id}/activate"), None)
            .await
    }

    pub async fn delete_project(&self, project_id: u64) -> FreeloResult<Value> {
        self.delete(&format!("/project/{project_id}")).await
    }
}
