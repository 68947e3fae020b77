/// In-memory repository backend
///
/// One [`MemoryStore`] implements all three repository traits over a single
/// `RwLock`ed state, so cross-entity invariants hold exactly as they do
/// under the SQL schema: deleting a user removes their projects and tasks,
/// deleting a project detaches its tasks, and the unique indexes
/// (`username`, `lower(email)`, `(owner_id, lower(name))`) are enforced on
/// insert/update.
///
/// Listings are ordered newest-first to match the Postgres backend.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskdeck::repo::memory::MemoryStore;
/// use taskdeck::services::task::TaskService;
///
/// let store = Arc::new(MemoryStore::new());
/// let tasks = TaskService::new(store.clone(), store.clone(), store);
/// ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::{
    NewProject, NewTask, NewUser, Project, ProjectStatus, Task, TaskStatus, User,
};
use crate::repo::{ProjectRepository, TaskRepository, UserRepository};

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<Uuid, User>,
    projects: HashMap<Uuid, Project>,
    tasks: HashMap<Uuid, Task>,
}

/// Shared in-memory entity store
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(mut items: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    items
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, data: NewUser) -> Result<User, RepositoryError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.username == data.username) {
            return Err(RepositoryError::Duplicate("users.username".to_string()));
        }
        if state
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&data.email))
        {
            return Err(RepositoryError::Duplicate("users.email".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password: data.password,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        debug!(user_id = %user.id, "Inserted user into memory store");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state.users.values().cloned().collect(),
            |u| u.created_at,
        ))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.users.values().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let mut state = self.state.write().await;

        if state
            .users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(RepositoryError::Duplicate("users.email".to_string()));
        }
        if !state.users.contains_key(&user.id) {
            return Err(RepositoryError::Database(sqlx::Error::RowNotFound));
        }

        let mut updated = user.clone();
        updated.updated_at = Utc::now();
        state.users.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        let removed = state.users.remove(&id).is_some();
        if removed {
            // Cascade, matching ON DELETE CASCADE in the SQL schema.
            state.projects.retain(|_, p| p.owner_id != id);
            state.tasks.retain(|_, t| t.owner_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn insert(&self, data: NewProject) -> Result<Project, RepositoryError> {
        let mut state = self.state.write().await;

        if state
            .projects
            .values()
            .any(|p| p.owner_id == data.owner_id && p.name.eq_ignore_ascii_case(&data.name))
        {
            return Err(RepositoryError::Duplicate(
                "projects.owner_id+name".to_string(),
            ));
        }

        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            status: data.status,
            owner_id: data.owner_id,
            created_at: now,
            updated_at: now,
        };
        state.projects.insert(project.id, project.clone());
        debug!(project_id = %project.id, "Inserted project into memory store");
        Ok(project)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        Ok(self.state.read().await.projects.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state.projects.values().cloned().collect(),
            |p| p.created_at,
        ))
    }

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Project>, RepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .projects
                .values()
                .filter(|p| p.owner_id == owner_id)
                .cloned()
                .collect(),
            |p| p.created_at,
        ))
    }

    async fn find_by_status(
        &self,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, RepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .projects
                .values()
                .filter(|p| p.status == status)
                .cloned()
                .collect(),
            |p| p.created_at,
        ))
    }

    async fn find_by_owner_id_and_status(
        &self,
        owner_id: Uuid,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, RepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .projects
                .values()
                .filter(|p| p.owner_id == owner_id && p.status == status)
                .cloned()
                .collect(),
            |p| p.created_at,
        ))
    }

    async fn find_by_name_containing(
        &self,
        fragment: &str,
    ) -> Result<Vec<Project>, RepositoryError> {
        let needle = fragment.to_lowercase();
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .projects
                .values()
                .filter(|p| p.name.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
            |p| p.created_at,
        ))
    }

    async fn find_by_owner_id_and_name_containing(
        &self,
        owner_id: Uuid,
        fragment: &str,
    ) -> Result<Vec<Project>, RepositoryError> {
        let needle = fragment.to_lowercase();
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .projects
                .values()
                .filter(|p| p.owner_id == owner_id && p.name.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
            |p| p.created_at,
        ))
    }

    async fn exists_by_owner_id_and_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> Result<bool, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .projects
            .values()
            .any(|p| p.owner_id == owner_id && p.name.eq_ignore_ascii_case(name)))
    }

    async fn update(&self, project: &Project) -> Result<Project, RepositoryError> {
        let mut state = self.state.write().await;

        if state.projects.values().any(|p| {
            p.id != project.id
                && p.owner_id == project.owner_id
                && p.name.eq_ignore_ascii_case(&project.name)
        }) {
            return Err(RepositoryError::Duplicate(
                "projects.owner_id+name".to_string(),
            ));
        }
        if !state.projects.contains_key(&project.id) {
            return Err(RepositoryError::Database(sqlx::Error::RowNotFound));
        }

        let mut updated = project.clone();
        updated.updated_at = Utc::now();
        state.projects.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        let removed = state.projects.remove(&id).is_some();
        if removed {
            // Detach, matching ON DELETE SET NULL in the SQL schema.
            for task in state.tasks.values_mut() {
                if task.project_id == Some(id) {
                    task.project_id = None;
                }
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn insert(&self, data: NewTask) -> Result<Task, RepositoryError> {
        let mut state = self.state.write().await;

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            status: data.status,
            due_date: data.due_date,
            owner_id: data.owner_id,
            project_id: data.project_id,
            created_at: now,
            updated_at: now,
        };
        state.tasks.insert(task.id, task.clone());
        debug!(task_id = %task.id, "Inserted task into memory store");
        Ok(task)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError> {
        Ok(self.state.read().await.tasks.get(&id).cloned())
    }

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Task>, RepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .tasks
                .values()
                .filter(|t| t.owner_id == owner_id)
                .cloned()
                .collect(),
            |t| t.created_at,
        ))
    }

    async fn find_by_project_id(&self, project_id: Uuid) -> Result<Vec<Task>, RepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .tasks
                .values()
                .filter(|t| t.project_id == Some(project_id))
                .cloned()
                .collect(),
            |t| t.created_at,
        ))
    }

    async fn find_by_owner_id_and_status(
        &self,
        owner_id: Uuid,
        status: TaskStatus,
    ) -> Result<Vec<Task>, RepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .tasks
                .values()
                .filter(|t| t.owner_id == owner_id && t.status == status)
                .cloned()
                .collect(),
            |t| t.created_at,
        ))
    }

    async fn find_by_project_id_and_status(
        &self,
        project_id: Uuid,
        status: TaskStatus,
    ) -> Result<Vec<Task>, RepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .tasks
                .values()
                .filter(|t| t.project_id == Some(project_id) && t.status == status)
                .cloned()
                .collect(),
            |t| t.created_at,
        ))
    }

    async fn find_due_before(
        &self,
        cutoff: DateTime<Utc>,
        excluded: &[TaskStatus],
    ) -> Result<Vec<Task>, RepositoryError> {
        let state = self.state.read().await;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|t| {
                t.due_date.map(|due| due < cutoff).unwrap_or(false)
                    && !excluded.contains(&t.status)
            })
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.due_date);
        Ok(tasks)
    }

    async fn find_by_owner_id_and_due_before(
        &self,
        owner_id: Uuid,
        cutoff: DateTime<Utc>,
        excluded: &[TaskStatus],
    ) -> Result<Vec<Task>, RepositoryError> {
        let state = self.state.read().await;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|t| {
                t.owner_id == owner_id
                    && t.due_date.map(|due| due < cutoff).unwrap_or(false)
                    && !excluded.contains(&t.status)
            })
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.due_date);
        Ok(tasks)
    }

    async fn count_by_project_id(&self, project_id: Uuid) -> Result<i64, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .values()
            .filter(|t| t.project_id == Some(project_id))
            .count() as i64)
    }

    async fn count_by_project_ids(
        &self,
        project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, i64>, RepositoryError> {
        let state = self.state.read().await;
        let mut counts = HashMap::new();
        for task in state.tasks.values() {
            if let Some(project_id) = task.project_id {
                if project_ids.contains(&project_id) {
                    *counts.entry(project_id).or_insert(0) += 1;
                }
            }
        }
        Ok(counts)
    }

    async fn update(&self, task: &Task) -> Result<Task, RepositoryError> {
        let mut state = self.state.write().await;
        if !state.tasks.contains_key(&task.id) {
            return Err(RepositoryError::Database(sqlx::Error::RowNotFound));
        }

        let mut updated = task.clone();
        updated.updated_at = Utc::now();
        state.tasks.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        Ok(state.tasks.remove(&id).is_some())
    }
}
