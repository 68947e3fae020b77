/// Wire-level input and response types
///
/// Create/update inputs carry `validator` derives for field-level checks
/// (length bounds, email format); the services run them before any business
/// validation. Response types flatten relationship references to id scalars
/// so no entity graph ever crosses the boundary, and the user's credential
/// never appears in a response.
///
/// Update inputs follow "absent means unchanged": a `None` field leaves the
/// entity field as it is. There is deliberately no way to clear an optional
/// field through an update.

pub mod project;
pub mod task;
pub mod user;

pub use project::{CreateProject, ProjectResponse, UpdateProject};
pub use task::{CreateTask, TaskResponse, UpdateTask};
pub use user::{CreateUser, UpdateUser, UserResponse};
