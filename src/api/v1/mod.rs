//! V1 REST façade over the Freelo API.
//!
//! Handlers forward 1:1 to one upstream endpoint and return its JSON
//! unchanged.

mod projects;
mod tasklists;
mod tasks;
mod users;

#[cfg(test)]
mod projects_test;

pub use projects::*;
pub use tasklists::*;
pub use tasks::*;
pub use users::*;
