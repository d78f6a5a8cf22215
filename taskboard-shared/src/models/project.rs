/// Project model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(100) NOT NULL,
///     description TEXT,
///     user_id BIGINT NOT NULL
///         CONSTRAINT projects_user_id_fkey REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use crate::models::{Page, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Project owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,

    pub name: String,

    /// Optional free text
    pub description: Option<String>,

    /// Owning user; fixed at creation
    pub user_id: i64,

    pub created_at: DateTime<Utc>,
}

/// Project together with every task that references it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectWithTasks {
    #[serde(flatten)]
    pub project: Project,

    /// Tasks in creation order; empty when none are attached
    pub tasks: Vec<Task>,
}

/// Input for inserting a project
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub user_id: i64,
}

/// Full replacement of a project's mutable fields
///
/// Unlike task updates this is not partial: a `None` description clears it.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub name: String,
    pub description: Option<String>,
}

/// Selection for project listings
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectFilter {
    /// Only projects owned by this user
    pub user_id: Option<i64>,

    /// Window over the result; `None` returns every match
    pub page: Option<Page>,
}
