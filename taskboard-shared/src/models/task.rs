/// Task model
///
/// # Status
///
/// ```text
/// pending ⇄ in_progress ⇄ completed
/// ```
///
/// Every status is reachable from every other one through an update; there is
/// no workflow ordering.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('pending', 'in_progress', 'completed');
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(100) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'pending',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     due_date DATE,
///     project_id BIGINT
///         CONSTRAINT tasks_project_id_fkey REFERENCES projects(id) ON DELETE SET NULL,
///     user_id BIGINT NOT NULL
///         CONSTRAINT tasks_user_id_fkey REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use crate::models::Page;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task urgency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,

    pub title: String,

    pub description: Option<String>,

    pub status: TaskStatus,

    pub priority: TaskPriority,

    /// Calendar date, no time component
    pub due_date: Option<NaiveDate>,

    /// Cleared when the referenced project is deleted
    pub project_id: Option<i64>,

    /// Owning user; fixed at creation
    pub user_id: i64,

    pub created_at: DateTime<Utc>,
}

/// Input for inserting a task
///
/// Defaults (`pending`, `medium`) are applied by the caller before insert.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub project_id: Option<i64>,
    pub user_id: i64,
}

/// Exclude-unset update of a task
///
/// `None` leaves a field untouched. Nullable fields use a nested option so
/// `Some(None)` clears the value while `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTask {
    pub title: Option<String>,

    /// New description (use Some(None) to clear)
    pub description: Option<Option<String>>,

    pub status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,

    /// New due date (use Some(None) to clear)
    pub due_date: Option<Option<NaiveDate>>,

    /// New project reference (use Some(None) to detach)
    pub project_id: Option<Option<i64>>,
}

impl UpdateTask {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.project_id.is_none()
    }

    /// Project the update points the task at, if it sets one
    pub fn referenced_project(&self) -> Option<i64> {
        self.project_id.flatten()
    }

    /// Applies every supplied field to `task`
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(project_id) = self.project_id {
            task.project_id = project_id;
        }
    }
}

/// Selection for task listings; all present filters must match
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub user_id: Option<i64>,
    pub project_id: Option<i64>,
    pub status: Option<TaskStatus>,

    /// Window over the result; `None` returns every match
    pub page: Option<Page>,
}

impl TaskFilter {
    /// Whether `task` satisfies every filter (pagination aside)
    pub fn matches(&self, task: &Task) -> bool {
        self.user_id.map_or(true, |id| task.user_id == id)
            && self.project_id.map_or(true, |id| task.project_id == Some(id))
            && self.status.map_or(true, |status| task.status == status)
    }
}
