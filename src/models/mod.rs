/// Persisted entity models
///
/// Each model module holds the entity struct (as stored), its status enum
/// where one exists, and the `New*` record used for inserts. Relationship
/// references are plain foreign-key ids (`owner_id`, `project_id`); related
/// entities are resolved explicitly by the service layer, never through
/// lazy proxies.
///
/// # Models
///
/// - `user`: user accounts; owners of projects and tasks
/// - `project`: per-owner groupings of tasks with a lifecycle status
/// - `task`: units of work, optionally grouped into one project

pub mod project;
pub mod task;
pub mod user;

pub use project::{NewProject, Project, ProjectStatus};
pub use task::{NewTask, Task, TaskStatus};
pub use user::{NewUser, User};
