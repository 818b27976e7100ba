//! Board entities as they arrive in analysis request payloads.
//!
//! All of these are owned by the backing data platform; this service only
//! reads them. Fields the frontend may omit carry serde defaults so a sparse
//! payload still deserializes.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub workflow: Option<Workflow>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Project {
    /// Workflow statuses, or an empty slice when no workflow is configured.
    pub fn statuses(&self) -> &[Status] {
        self.workflow
            .as_ref()
            .map(|w| w.statuses.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub statuses: Vec<Status>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    pub id: i64,
    pub name: String,
    pub order: i64,
}

/// A task as it appears on a board listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub priority: String,
    /// Tasks whose status id resolves to no workflow status are dropped from
    /// the formatted view rather than rejected.
    #[serde(default)]
    pub status_id: Option<i64>,
}

/// The slice of a task the task-level helpers need. Only `title` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskDetails {
    pub title: String,
    #[serde(default)]
    pub description: String,
}
