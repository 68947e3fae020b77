/// Project mapping

use uuid::Uuid;

use crate::dto::project::{CreateProject, ProjectResponse, UpdateProject};
use crate::models::project::{NewProject, Project};

/// Builds the insert record from a create input
///
/// `owner_id` is passed separately: the service has already confirmed the
/// owner exists.
pub fn new_project(input: CreateProject, owner_id: Uuid) -> NewProject {
    NewProject {
        name: input.name,
        description: input.description,
        status: input.status.unwrap_or_default(),
        owner_id,
    }
}

/// Flattens a project for the wire
///
/// `task_count` is computed by the service (batched count query) and
/// injected here.
pub fn to_response(project: &Project, task_count: i64) -> ProjectResponse {
    ProjectResponse {
        id: project.id,
        name: project.name.clone(),
        description: project.description.clone(),
        status: project.status,
        owner_id: project.owner_id,
        task_count,
        created_at: project.created_at,
        updated_at: project.updated_at,
    }
}

/// Applies a partial update; `None` fields are left unchanged
pub fn apply_update(project: &mut Project, input: &UpdateProject) {
    if let Some(name) = &input.name {
        project.name = name.clone();
    }
    if let Some(description) = &input.description {
        project.description = Some(description.clone());
    }
    if let Some(status) = input.status {
        project.status = status;
    }
}
