/// Task input and response types
///
/// Task inputs never carry an owner: the acting owner arrives as a separate
/// service argument from the authentication boundary, so a request body can
/// never claim a different owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::TaskStatus;

/// Input for creating a new task
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    /// Short title
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,

    /// Optional description
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Initial status; defaults to todo when absent
    pub status: Option<TaskStatus>,

    /// Optional due timestamp
    pub due_date: Option<DateTime<Utc>>,

    /// Project to place the task in; must belong to the acting owner
    pub project_id: Option<Uuid>,
}

/// Input for updating an existing task
///
/// Owner is immutable and the project reference has dedicated operations
/// (`assign_to_project` / `remove_from_project`), so neither appears here.
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTask {
    /// New title
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,

    /// New description
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New due timestamp
    pub due_date: Option<DateTime<Utc>>,
}

/// Task as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub owner_id: Uuid,
    pub project_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
