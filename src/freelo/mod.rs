//! Freelo REST API client.
//!
//! A thin pass-through layer: each method maps to one upstream endpoint and
//! returns the upstream JSON untouched. Nothing is cached.

mod client;
mod comments;
mod error;
mod projects;
mod tasklists;
mod tasks;
mod time_tracking;
mod users;


use serde::Serialize;

pub use client::FreeloClient;
pub use comments::CommentFilter;
pub use error::{FreeloError, FreeloResult};
pub use projects::NewProject;
pub use tasklists::NewTasklist;
pub use tasks::TaskFilter;
pub use time_tracking::StartTracking;

pub(crate) const NO_QUERY: &[(&str, &str)] = &[];

/// Page selector shared by the paginated `all-*` endpoints.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Page {
    #[serde(rename = "p", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl Page {
    pub fn new(page: Option<u32>) -> Self {
        Self { page }
    }
}
