/// Project service
///
/// Creation requires an existing owner and enforces per-owner name
/// uniqueness (case-insensitive). Every response carries a `task_count`
/// computed at read time; list operations fetch all counts with a single
/// batched query rather than one count per project.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::project::{CreateProject, ProjectResponse, UpdateProject};
use crate::error::{ServiceError, ServiceResult};
use crate::mappers;
use crate::models::{Project, ProjectStatus};
use crate::repo::{ProjectRepository, TaskRepository, UserRepository};
use crate::services::require_id;

/// Service for projects
#[derive(Clone)]
pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl ProjectService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        users: Arc<dyn UserRepository>,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        Self {
            projects,
            users,
            tasks,
        }
    }

    /// Creates a project for an existing owner
    ///
    /// # Errors
    ///
    /// `NotFound` if the owner does not exist; `Validation` if the owner
    /// already has a project with this name.
    pub async fn create(&self, input: CreateProject) -> ServiceResult<ProjectResponse> {
        input.validate()?;
        let owner_id = require_id(input.owner_id, "owner id")?;

        if self.users.find_by_id(owner_id).await?.is_none() {
            return Err(ServiceError::not_found("user", owner_id));
        }
        if self
            .projects
            .exists_by_owner_id_and_name(owner_id, &input.name)
            .await?
        {
            return Err(ServiceError::Validation(format!(
                "project '{}' already exists for this user",
                input.name
            )));
        }

        let project = self
            .projects
            .insert(mappers::project::new_project(input, owner_id))
            .await?;
        info!(project_id = %project.id, owner_id = %owner_id, "Created project");

        // A new project has no tasks yet.
        Ok(mappers::project::to_response(&project, 0))
    }

    /// Fetches a project by id, failing with `NotFound` on miss
    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<ProjectResponse> {
        require_id(id, "project id")?;

        let project = self
            .projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("project", id))?;

        self.enrich_one(&project).await
    }

    /// Fetches a project by id, returning `None` on miss
    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<Option<ProjectResponse>> {
        require_id(id, "project id")?;

        match self.projects.find_by_id(id).await? {
            Some(project) => Ok(Some(self.enrich_one(&project).await?)),
            None => Ok(None),
        }
    }

    /// Lists all projects
    pub async fn find_all(&self) -> ServiceResult<Vec<ProjectResponse>> {
        let projects = self.projects.find_all().await?;
        self.enrich(projects).await
    }

    /// Lists projects belonging to one owner
    pub async fn find_by_owner_id(&self, owner_id: Uuid) -> ServiceResult<Vec<ProjectResponse>> {
        require_id(owner_id, "owner id")?;

        let projects = self.projects.find_by_owner_id(owner_id).await?;
        self.enrich(projects).await
    }

    /// Lists projects in a given status
    pub async fn find_by_status(
        &self,
        status: ProjectStatus,
    ) -> ServiceResult<Vec<ProjectResponse>> {
        let projects = self.projects.find_by_status(status).await?;
        self.enrich(projects).await
    }

    /// Lists one owner's projects in a given status
    pub async fn find_by_owner_id_and_status(
        &self,
        owner_id: Uuid,
        status: ProjectStatus,
    ) -> ServiceResult<Vec<ProjectResponse>> {
        require_id(owner_id, "owner id")?;

        let projects = self
            .projects
            .find_by_owner_id_and_status(owner_id, status)
            .await?;
        self.enrich(projects).await
    }

    /// Case-insensitive substring search on project name
    pub async fn find_by_name_containing(
        &self,
        fragment: &str,
    ) -> ServiceResult<Vec<ProjectResponse>> {
        let projects = self.projects.find_by_name_containing(fragment).await?;
        self.enrich(projects).await
    }

    /// Owner-scoped case-insensitive substring search on project name
    pub async fn find_by_owner_id_and_name_containing(
        &self,
        owner_id: Uuid,
        fragment: &str,
    ) -> ServiceResult<Vec<ProjectResponse>> {
        require_id(owner_id, "owner id")?;

        let projects = self
            .projects
            .find_by_owner_id_and_name_containing(owner_id, fragment)
            .await?;
        self.enrich(projects).await
    }

    /// Applies a partial update to a project
    ///
    /// The owner is immutable (the update DTO cannot carry one). Per-owner
    /// name uniqueness is re-validated only when the name actually changes.
    pub async fn update(&self, id: Uuid, input: UpdateProject) -> ServiceResult<ProjectResponse> {
        require_id(id, "project id")?;
        input.validate()?;

        let mut project = self
            .projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("project", id))?;

        if let Some(name) = &input.name {
            let changed = !name.eq_ignore_ascii_case(&project.name);
            if changed
                && self
                    .projects
                    .exists_by_owner_id_and_name(project.owner_id, name)
                    .await?
            {
                return Err(ServiceError::Validation(format!(
                    "project '{}' already exists for this user",
                    name
                )));
            }
        }

        mappers::project::apply_update(&mut project, &input);
        let updated = self.projects.update(&project).await?;
        info!(project_id = %updated.id, "Updated project");

        self.enrich_one(&updated).await
    }

    /// Deletes a project; its tasks are detached, not deleted
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        require_id(id, "project id")?;

        if !self.projects.delete(id).await? {
            return Err(ServiceError::not_found("project", id));
        }
        info!(project_id = %id, "Deleted project");

        Ok(())
    }

    async fn enrich_one(&self, project: &Project) -> ServiceResult<ProjectResponse> {
        let task_count = self.tasks.count_by_project_id(project.id).await?;
        Ok(mappers::project::to_response(project, task_count))
    }

    /// Enriches a listing with task counts using one batched count query
    async fn enrich(&self, projects: Vec<Project>) -> ServiceResult<Vec<ProjectResponse>> {
        if projects.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();
        let counts = self.tasks.count_by_project_ids(&ids).await?;

        Ok(projects
            .iter()
            .map(|p| {
                let task_count = counts.get(&p.id).copied().unwrap_or(0);
                mappers::project::to_response(p, task_count)
            })
            .collect())
    }
}
