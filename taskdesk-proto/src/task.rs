//! Task entity and the bodies of the task endpoints.
//!
//! Tasks are owned by the remote API. The client only ever holds copies
//! returned by a round trip, so every field mirrors the API's JSON shape
//! (`_id`, camelCase timestamps).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum allowed task title length in characters.
pub const MAX_TASK_TITLE_LENGTH: usize = 256;

/// A task as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier assigned by the API.
    #[serde(rename = "_id")]
    pub id: String,
    /// Task title.
    pub title: String,
    /// Completion flag.
    pub done: bool,
    /// Account that created the task.
    pub created_by: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Account that last modified the task, if ever modified.
    #[serde(default)]
    pub updated_by: Option<String>,
    /// Last modification time, if ever modified.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /tasks/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Title of the new task.
    pub title: String,
}

/// Body of `PATCH /tasks/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    /// Replacement title.
    pub title: String,
}

/// Body of `PATCH /tasks/done/:id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// Requested completion flag.
    pub done: bool,
}

/// Response of `DELETE /tasks/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    /// Confirmation text.
    pub message: String,
}
