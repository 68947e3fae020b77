/// PostgreSQL repository implementations
///
/// One repository struct per entity, each holding a `PgPool` clone. Queries
/// follow the schema in `migrations/`: lookups with `fetch_optional`,
/// listings ordered by creation time (newest first), inserts and updates
/// with `RETURNING` so server-assigned columns come back in one round trip.
///
/// Unique-index violations on insert/update are mapped to
/// [`RepositoryError::Duplicate`] so the service layer can treat a lost
/// check-then-insert race like any other uniqueness failure.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::{
    NewProject, NewTask, NewUser, Project, ProjectStatus, Task, TaskStatus, User,
};
use crate::repo::{ProjectRepository, TaskRepository, UserRepository};

const USER_COLUMNS: &str = "id, username, email, password, created_at, updated_at";
const PROJECT_COLUMNS: &str = "id, name, description, status, owner_id, created_at, updated_at";
const TASK_COLUMNS: &str =
    "id, title, description, status, due_date, owner_id, project_id, created_at, updated_at";

/// Maps a unique-index violation to `Duplicate`; passes everything else on
fn map_unique(err: sqlx::Error, constraint: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Duplicate(constraint.to_string())
        }
        _ => RepositoryError::Database(err),
    }
}

/// User repository over PostgreSQL
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, data: NewUser) -> Result<User, RepositoryError> {
        info!(username = %data.username, "Inserting user");

        let query = format!(
            "INSERT INTO users (username, email, password)
             VALUES ($1, $2, $3)
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(data.username)
            .bind(data.email)
            .bind(data.password)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique(e, "users.username/email"))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE lower(email) = lower($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        debug!(user_id = %user.id, "Updating user");

        let query = format!(
            "UPDATE users
             SET email = $2, password = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique(e, "users.email"))?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        info!(user_id = %id, "Deleting user");

        // Owned projects and tasks go via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Project repository over PostgreSQL
#[derive(Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn insert(&self, data: NewProject) -> Result<Project, RepositoryError> {
        info!(owner_id = %data.owner_id, name = %data.name, "Inserting project");

        let query = format!(
            "INSERT INTO projects (name, description, status, owner_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {PROJECT_COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(data.name)
            .bind(data.description)
            .bind(data.status)
            .bind(data.owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique(e, "projects.owner_id+name"))?;

        Ok(project)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC");
        let projects = sqlx::query_as::<_, Project>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Project>, RepositoryError> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE owner_id = $1
             ORDER BY created_at DESC"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn find_by_status(
        &self,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, RepositoryError> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE status = $1
             ORDER BY created_at DESC"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn find_by_owner_id_and_status(
        &self,
        owner_id: Uuid,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, RepositoryError> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE owner_id = $1 AND status = $2
             ORDER BY created_at DESC"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn find_by_name_containing(
        &self,
        fragment: &str,
    ) -> Result<Vec<Project>, RepositoryError> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE name ILIKE '%' || $1 || '%'
             ORDER BY created_at DESC"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(fragment)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn find_by_owner_id_and_name_containing(
        &self,
        owner_id: Uuid,
        fragment: &str,
    ) -> Result<Vec<Project>, RepositoryError> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE owner_id = $1 AND name ILIKE '%' || $2 || '%'
             ORDER BY created_at DESC"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(fragment)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn exists_by_owner_id_and_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM projects
                WHERE owner_id = $1 AND lower(name) = lower($2)
            )",
        )
        .bind(owner_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, project: &Project) -> Result<Project, RepositoryError> {
        debug!(project_id = %project.id, "Updating project");

        let query = format!(
            "UPDATE projects
             SET name = $2, description = $3, status = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING {PROJECT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Project>(&query)
            .bind(project.id)
            .bind(&project.name)
            .bind(&project.description)
            .bind(project.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique(e, "projects.owner_id+name"))?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        info!(project_id = %id, "Deleting project");

        // Tasks in the project are detached via ON DELETE SET NULL.
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Task repository over PostgreSQL
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn insert(&self, data: NewTask) -> Result<Task, RepositoryError> {
        info!(owner_id = %data.owner_id, title = %data.title, "Inserting task");

        let query = format!(
            "INSERT INTO tasks (title, description, status, due_date, owner_id, project_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {TASK_COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(data.title)
            .bind(data.description)
            .bind(data.status)
            .bind(data.due_date)
            .bind(data.owner_id)
            .bind(data.project_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(task)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(task)
    }

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Task>, RepositoryError> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE owner_id = $1
             ORDER BY created_at DESC"
        );
        let tasks = sqlx::query_as::<_, Task>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn find_by_project_id(&self, project_id: Uuid) -> Result<Vec<Task>, RepositoryError> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE project_id = $1
             ORDER BY created_at DESC"
        );
        let tasks = sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn find_by_owner_id_and_status(
        &self,
        owner_id: Uuid,
        status: TaskStatus,
    ) -> Result<Vec<Task>, RepositoryError> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE owner_id = $1 AND status = $2
             ORDER BY created_at DESC"
        );
        let tasks = sqlx::query_as::<_, Task>(&query)
            .bind(owner_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn find_by_project_id_and_status(
        &self,
        project_id: Uuid,
        status: TaskStatus,
    ) -> Result<Vec<Task>, RepositoryError> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE project_id = $1 AND status = $2
             ORDER BY created_at DESC"
        );
        let tasks = sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn find_due_before(
        &self,
        cutoff: DateTime<Utc>,
        excluded: &[TaskStatus],
    ) -> Result<Vec<Task>, RepositoryError> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE due_date < $1 AND status != ALL($2)
             ORDER BY due_date ASC"
        );
        let tasks = sqlx::query_as::<_, Task>(&query)
            .bind(cutoff)
            .bind(excluded.to_vec())
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn find_by_owner_id_and_due_before(
        &self,
        owner_id: Uuid,
        cutoff: DateTime<Utc>,
        excluded: &[TaskStatus],
    ) -> Result<Vec<Task>, RepositoryError> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE owner_id = $1 AND due_date < $2 AND status != ALL($3)
             ORDER BY due_date ASC"
        );
        let tasks = sqlx::query_as::<_, Task>(&query)
            .bind(owner_id)
            .bind(cutoff)
            .bind(excluded.to_vec())
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn count_by_project_id(&self, project_id: Uuid) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn count_by_project_ids(
        &self,
        project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, i64>, RepositoryError> {
        if project_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            "SELECT project_id, COUNT(*) FROM tasks
             WHERE project_id = ANY($1)
             GROUP BY project_id",
        )
        .bind(project_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    async fn update(&self, task: &Task) -> Result<Task, RepositoryError> {
        debug!(task_id = %task.id, "Updating task");

        let query = format!(
            "UPDATE tasks
             SET title = $2, description = $3, status = $4, due_date = $5,
                 project_id = $6, updated_at = NOW()
             WHERE id = $1
             RETURNING {TASK_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Task>(&query)
            .bind(task.id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.status)
            .bind(task.due_date)
            .bind(task.project_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        info!(task_id = %id, "Deleting task");

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
