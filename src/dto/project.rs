/// Project input and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ProjectStatus;

/// Input for creating a new project
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    /// Project name; unique per owner, case-insensitively
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,

    /// Optional description
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Initial status; defaults to planning when absent
    pub status: Option<ProjectStatus>,

    /// Owning user; must exist, immutable after creation
    pub owner_id: Uuid,
}

/// Input for updating an existing project
///
/// Owner is immutable, so it is not representable here. `None` fields are
/// left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    /// New name; re-checked for per-owner uniqueness if it changes
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,

    /// New description
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// New status
    pub status: Option<ProjectStatus>,
}

/// Project as returned to callers
///
/// `task_count` is computed at read time from the tasks currently assigned
/// to the project; it is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub owner_id: Uuid,
    pub task_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_rejects_empty_name() {
        let input = CreateProject {
            name: String::new(),
            description: None,
            status: None,
            owner_id: Uuid::new_v4(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_project_empty_is_valid() {
        assert!(UpdateProject::default().validate().is_ok());
    }
}
