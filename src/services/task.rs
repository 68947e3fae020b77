/// Task service
///
/// Every operation is scoped to an acting owner supplied by the (external)
/// authentication boundary. Reads and writes first load the task and verify
/// it belongs to that owner: absence is `NotFound`, a mismatch is
/// `Validation` — the caller learns the task exists but is not theirs only
/// through a rejection, never through data.
///
/// The project reference changes only through `assign_to_project` /
/// `remove_from_project`; both sides of an assignment must belong to the
/// acting owner.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::task::{CreateTask, TaskResponse, UpdateTask};
use crate::error::{ServiceError, ServiceResult};
use crate::mappers;
use crate::models::{Project, Task, TaskStatus};
use crate::repo::{ProjectRepository, TaskRepository, UserRepository};
use crate::services::require_id;

const OWNERSHIP_MISMATCH: &str = "task does not belong to authenticated user";
const PROJECT_MISMATCH: &str = "project does not belong to authenticated user";

/// Service for tasks, scoped to an acting owner
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserRepository>,
}

impl TaskService {
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        projects: Arc<dyn ProjectRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            tasks,
            projects,
            users,
        }
    }

    /// Creates a task for the acting owner
    ///
    /// # Errors
    ///
    /// `NotFound` if the owner or the referenced project does not exist;
    /// `Validation` if the project belongs to someone else.
    pub async fn create(&self, input: CreateTask, owner_id: Uuid) -> ServiceResult<TaskResponse> {
        let owner_id = require_id(owner_id, "owner id")?;
        input.validate()?;

        if self.users.find_by_id(owner_id).await?.is_none() {
            return Err(ServiceError::not_found("user", owner_id));
        }
        if let Some(project_id) = input.project_id {
            self.load_owned_project(project_id, owner_id).await?;
        }

        let task = self
            .tasks
            .insert(mappers::task::new_task(input, owner_id))
            .await?;
        info!(task_id = %task.id, owner_id = %owner_id, "Created task");

        Ok(mappers::task::to_response(&task))
    }

    /// Fetches a task, failing with `NotFound` on miss
    pub async fn get_by_id(&self, task_id: Uuid, owner_id: Uuid) -> ServiceResult<TaskResponse> {
        let task = self.load_owned_task(task_id, owner_id).await?;
        Ok(mappers::task::to_response(&task))
    }

    /// Fetches a task, returning `None` on miss
    ///
    /// A task that exists but belongs to someone else is still a
    /// `Validation` error, not `None`.
    pub async fn find_by_id(
        &self,
        task_id: Uuid,
        owner_id: Uuid,
    ) -> ServiceResult<Option<TaskResponse>> {
        require_id(task_id, "task id")?;
        let owner_id = require_id(owner_id, "owner id")?;

        match self.tasks.find_by_id(task_id).await? {
            None => Ok(None),
            Some(task) if task.owner_id != owner_id => {
                Err(ServiceError::Validation(OWNERSHIP_MISMATCH.to_string()))
            }
            Some(task) => Ok(Some(mappers::task::to_response(&task))),
        }
    }

    /// Lists all tasks belonging to the acting owner
    pub async fn find_all(&self, owner_id: Uuid) -> ServiceResult<Vec<TaskResponse>> {
        let owner_id = require_id(owner_id, "owner id")?;

        let tasks = self.tasks.find_by_owner_id(owner_id).await?;
        Ok(mappers::task::to_responses(&tasks))
    }

    /// Lists tasks in one of the owner's projects
    pub async fn find_by_project_id(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
    ) -> ServiceResult<Vec<TaskResponse>> {
        let owner_id = require_id(owner_id, "owner id")?;
        self.load_owned_project(project_id, owner_id).await?;

        let tasks = self.tasks.find_by_project_id(project_id).await?;
        Ok(mappers::task::to_responses(&tasks))
    }

    /// Lists the owner's tasks in a given status
    pub async fn find_by_status(
        &self,
        owner_id: Uuid,
        status: TaskStatus,
    ) -> ServiceResult<Vec<TaskResponse>> {
        let owner_id = require_id(owner_id, "owner id")?;

        let tasks = self
            .tasks
            .find_by_owner_id_and_status(owner_id, status)
            .await?;
        Ok(mappers::task::to_responses(&tasks))
    }

    /// Lists tasks in one of the owner's projects filtered by status
    pub async fn find_by_project_id_and_status(
        &self,
        project_id: Uuid,
        status: TaskStatus,
        owner_id: Uuid,
    ) -> ServiceResult<Vec<TaskResponse>> {
        let owner_id = require_id(owner_id, "owner id")?;
        self.load_owned_project(project_id, owner_id).await?;

        let tasks = self
            .tasks
            .find_by_project_id_and_status(project_id, status)
            .await?;
        Ok(mappers::task::to_responses(&tasks))
    }

    /// Lists the owner's overdue tasks
    ///
    /// Overdue means the due date is in the past and the status is not
    /// terminal (completed/cancelled tasks are never overdue).
    pub async fn find_overdue(&self, owner_id: Uuid) -> ServiceResult<Vec<TaskResponse>> {
        let owner_id = require_id(owner_id, "owner id")?;

        let tasks = self
            .tasks
            .find_by_owner_id_and_due_before(owner_id, Utc::now(), &TaskStatus::TERMINAL)
            .await?;
        Ok(mappers::task::to_responses(&tasks))
    }

    /// Applies a partial update to one of the owner's tasks
    pub async fn update(
        &self,
        task_id: Uuid,
        input: UpdateTask,
        owner_id: Uuid,
    ) -> ServiceResult<TaskResponse> {
        input.validate()?;
        let mut task = self.load_owned_task(task_id, owner_id).await?;

        mappers::task::apply_update(&mut task, &input);
        let updated = self.tasks.update(&task).await?;
        info!(task_id = %updated.id, "Updated task");

        Ok(mappers::task::to_response(&updated))
    }

    /// Moves a task into a project
    ///
    /// Both the task and the project must belong to the acting owner. A
    /// task already in another project is simply moved.
    pub async fn assign_to_project(
        &self,
        task_id: Uuid,
        project_id: Uuid,
        owner_id: Uuid,
    ) -> ServiceResult<TaskResponse> {
        let mut task = self.load_owned_task(task_id, owner_id).await?;
        let project = self.load_owned_project(project_id, task.owner_id).await?;

        task.project_id = Some(project.id);
        let updated = self.tasks.update(&task).await?;
        info!(task_id = %updated.id, project_id = %project.id, "Assigned task to project");

        Ok(mappers::task::to_response(&updated))
    }

    /// Clears a task's project reference
    ///
    /// A no-op if the task is not in a project.
    pub async fn remove_from_project(
        &self,
        task_id: Uuid,
        owner_id: Uuid,
    ) -> ServiceResult<TaskResponse> {
        let mut task = self.load_owned_task(task_id, owner_id).await?;

        task.project_id = None;
        let updated = self.tasks.update(&task).await?;
        info!(task_id = %updated.id, "Removed task from project");

        Ok(mappers::task::to_response(&updated))
    }

    /// Deletes one of the owner's tasks
    pub async fn delete(&self, task_id: Uuid, owner_id: Uuid) -> ServiceResult<()> {
        let task = self.load_owned_task(task_id, owner_id).await?;

        self.tasks.delete(task.id).await?;
        info!(task_id = %task.id, "Deleted task");

        Ok(())
    }

    /// Loads a task and verifies it belongs to the acting owner
    async fn load_owned_task(&self, task_id: Uuid, owner_id: Uuid) -> ServiceResult<Task> {
        require_id(task_id, "task id")?;
        let owner_id = require_id(owner_id, "owner id")?;

        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("task", task_id))?;

        if task.owner_id != owner_id {
            return Err(ServiceError::Validation(OWNERSHIP_MISMATCH.to_string()));
        }

        Ok(task)
    }

    /// Loads a project and verifies it belongs to the acting owner
    async fn load_owned_project(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
    ) -> ServiceResult<Project> {
        require_id(project_id, "project id")?;

        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("project", project_id))?;

        if project.owner_id != owner_id {
            return Err(ServiceError::Validation(PROJECT_MISMATCH.to_string()));
        }

        Ok(project)
    }
}
