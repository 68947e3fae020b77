/// Repository layer
///
/// Traits describing read/write access over the entity store, with two
/// backends:
///
/// - `postgres`: sqlx-backed implementation over a `PgPool`
/// - `memory`: a single shared in-memory store implementing all three
///   traits, for tests and embedding
///
/// Contract notes:
///
/// - lookups return `Ok(None)` on miss; they never error for absence
/// - owner-scoped listings filter on the owner id column directly, never by
///   fetching the owner first
/// - existence checks are implemented as EXISTS/COUNT queries and never
///   load full entities
/// - `insert`/`update` surface unique-index violations as
///   [`RepositoryError::Duplicate`]
/// - `update` persists the full mutable field set of the passed entity;
///   partial-update semantics live in the mappers, not here
/// - `delete` returns whether a row was removed

pub mod memory;
pub mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::{
    NewProject, NewTask, NewUser, Project, ProjectStatus, Task, TaskStatus, User,
};

/// Read/write access to users
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, data: NewUser) -> Result<User, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Case-sensitive username lookup
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError>;

    /// Case-insensitive email existence check
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError>;

    async fn update(&self, user: &User) -> Result<User, RepositoryError>;

    /// Deletes a user; owned projects and tasks go with them
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// Read/write access to projects
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn insert(&self, data: NewProject) -> Result<Project, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError>;

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Project>, RepositoryError>;

    async fn find_by_status(&self, status: ProjectStatus)
        -> Result<Vec<Project>, RepositoryError>;

    async fn find_by_owner_id_and_status(
        &self,
        owner_id: Uuid,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, RepositoryError>;

    /// Case-insensitive substring match on name
    async fn find_by_name_containing(
        &self,
        fragment: &str,
    ) -> Result<Vec<Project>, RepositoryError>;

    async fn find_by_owner_id_and_name_containing(
        &self,
        owner_id: Uuid,
        fragment: &str,
    ) -> Result<Vec<Project>, RepositoryError>;

    /// Case-insensitive per-owner name existence check
    async fn exists_by_owner_id_and_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> Result<bool, RepositoryError>;

    async fn update(&self, project: &Project) -> Result<Project, RepositoryError>;

    /// Deletes a project; its tasks are detached, not deleted
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// Read/write access to tasks
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn insert(&self, data: NewTask) -> Result<Task, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError>;

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Task>, RepositoryError>;

    async fn find_by_project_id(&self, project_id: Uuid) -> Result<Vec<Task>, RepositoryError>;

    async fn find_by_owner_id_and_status(
        &self,
        owner_id: Uuid,
        status: TaskStatus,
    ) -> Result<Vec<Task>, RepositoryError>;

    async fn find_by_project_id_and_status(
        &self,
        project_id: Uuid,
        status: TaskStatus,
    ) -> Result<Vec<Task>, RepositoryError>;

    /// Tasks due before `cutoff` whose status is not in `excluded`
    async fn find_due_before(
        &self,
        cutoff: DateTime<Utc>,
        excluded: &[TaskStatus],
    ) -> Result<Vec<Task>, RepositoryError>;

    /// Owner-scoped variant of [`find_due_before`](Self::find_due_before)
    async fn find_by_owner_id_and_due_before(
        &self,
        owner_id: Uuid,
        cutoff: DateTime<Utc>,
        excluded: &[TaskStatus],
    ) -> Result<Vec<Task>, RepositoryError>;

    async fn count_by_project_id(&self, project_id: Uuid) -> Result<i64, RepositoryError>;

    /// Batched per-project counts in one query
    ///
    /// Projects with no tasks are absent from the map; callers default to
    /// zero. This is the path that keeps project listings at one count
    /// query instead of one per row.
    async fn count_by_project_ids(
        &self,
        project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, i64>, RepositoryError>;

    async fn update(&self, task: &Task) -> Result<Task, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
