/// Task mapping

use uuid::Uuid;

use crate::dto::task::{CreateTask, TaskResponse, UpdateTask};
use crate::models::task::{NewTask, Task};

/// Builds the insert record from a create input
///
/// `owner_id` comes from the authentication boundary and `project_id` from
/// the input, both already validated by the service.
pub fn new_task(input: CreateTask, owner_id: Uuid) -> NewTask {
    NewTask {
        title: input.title,
        description: input.description,
        status: input.status.unwrap_or_default(),
        due_date: input.due_date,
        owner_id,
        project_id: input.project_id,
    }
}

/// Flattens a task for the wire
pub fn to_response(task: &Task) -> TaskResponse {
    TaskResponse {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        status: task.status,
        due_date: task.due_date,
        owner_id: task.owner_id,
        project_id: task.project_id,
        created_at: task.created_at,
        updated_at: task.updated_at,
    }
}

pub fn to_responses(tasks: &[Task]) -> Vec<TaskResponse> {
    tasks.iter().map(to_response).collect()
}

/// Applies a partial update; `None` fields are left unchanged
///
/// The project reference is not touched here; it changes only through the
/// dedicated assign/remove operations.
pub fn apply_update(task: &mut Task, input: &UpdateTask) {
    if let Some(title) = &input.title {
        task.title = title.clone();
    }
    if let Some(description) = &input.description {
        task.description = Some(description.clone());
    }
    if let Some(status) = input.status {
        task.status = status;
    }
    if let Some(due_date) = input.due_date {
        task.due_date = Some(due_date);
    }
}
