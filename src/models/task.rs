/// Task model
///
/// Tasks are the unit of work. Every task is owned by exactly one user
/// (immutable) and belongs to at most one project at a time, or none. The
/// project reference is mutable but must always point at a project owned by
/// the same user; the service layer enforces that invariant.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM (
///     'todo', 'in_progress', 'completed', 'cancelled'
/// );
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(200) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'todo',
///     due_date TIMESTAMPTZ,
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     project_id UUID REFERENCES projects(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task progress status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet (the default for new tasks)
    Todo,

    /// Being worked on
    InProgress,

    /// Finished successfully
    Completed,

    /// Abandoned
    Cancelled,
}

impl TaskStatus {
    /// Statuses excluded from overdue queries
    pub const TERMINAL: [TaskStatus; 2] = [TaskStatus::Completed, TaskStatus::Cancelled];

    /// Converts status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    /// Checks if the status is terminal (no further work expected)
    ///
    /// Terminal tasks never count as overdue regardless of due date.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }
}

impl sqlx::postgres::PgHasArrayType for TaskStatus {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_task_status")
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

/// Task owned by a user, optionally grouped into one of their projects
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Short human-readable title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Current progress status
    pub status: TaskStatus,

    /// Optional due timestamp; drives overdue queries
    pub due_date: Option<DateTime<Utc>>,

    /// Owning user; immutable after creation
    pub owner_id: Uuid,

    /// Project this task belongs to, if any
    ///
    /// Must belong to the same owner as the task. Cleared when the project
    /// is deleted (detach, not cascade).
    pub project_id: Option<Uuid>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Insert record for a new task
///
/// `owner_id` and `project_id` are resolved and ownership-checked by the
/// service before this record is built.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub owner_id: Uuid,
    pub project_id: Option<Uuid>,
}
