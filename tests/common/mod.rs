/// Shared test fixtures
///
/// All service tests run against the in-memory store, so the suite needs no
/// external database. One store backs all three services, which is what
/// makes the cascade/detach assertions meaningful.

use std::sync::Arc;

use taskdeck::dto::project::{CreateProject, ProjectResponse};
use taskdeck::dto::task::{CreateTask, TaskResponse};
use taskdeck::dto::user::{CreateUser, UserResponse};
use taskdeck::models::{ProjectStatus, TaskStatus};
use taskdeck::repo::memory::MemoryStore;
use taskdeck::services::{ProjectService, TaskService, UserService};
use uuid::Uuid;

pub struct TestContext {
    pub users: UserService,
    pub projects: ProjectService,
    pub tasks: TaskService,
}

/// Installs a log subscriber once so `RUST_LOG=debug` surfaces service logs
fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

impl TestContext {
    pub fn new() -> Self {
        init_tracing();
        let store = Arc::new(MemoryStore::new());
        Self {
            users: UserService::new(store.clone()),
            projects: ProjectService::new(store.clone(), store.clone(), store.clone()),
            tasks: TaskService::new(store.clone(), store.clone(), store),
        }
    }

    pub async fn user(&self, username: &str, email: &str) -> UserResponse {
        self.users
            .create(CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password: "opaque-credential".to_string(),
            })
            .await
            .expect("fixture user should be created")
    }

    pub async fn project(&self, owner_id: Uuid, name: &str) -> ProjectResponse {
        self.project_with_status(owner_id, name, ProjectStatus::Planning)
            .await
    }

    pub async fn project_with_status(
        &self,
        owner_id: Uuid,
        name: &str,
        status: ProjectStatus,
    ) -> ProjectResponse {
        self.projects
            .create(CreateProject {
                name: name.to_string(),
                description: None,
                status: Some(status),
                owner_id,
            })
            .await
            .expect("fixture project should be created")
    }

    pub async fn task(&self, owner_id: Uuid, title: &str) -> TaskResponse {
        self.task_with(owner_id, title, None, None).await
    }

    pub async fn task_with(
        &self,
        owner_id: Uuid,
        title: &str,
        project_id: Option<Uuid>,
        status: Option<TaskStatus>,
    ) -> TaskResponse {
        self.tasks
            .create(
                CreateTask {
                    title: title.to_string(),
                    description: None,
                    status,
                    due_date: None,
                    project_id,
                },
                owner_id,
            )
            .await
            .expect("fixture task should be created")
    }
}
