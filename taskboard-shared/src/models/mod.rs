/// Domain models for Taskboard
///
/// Plain data types shared by the store implementations, the services, and the
/// HTTP layer. Persistence lives in [`crate::store`]; models carry no I/O.
///
/// # Models
///
/// - `user`: user accounts (password hash never serialized)
/// - `project`: projects owned by a user
/// - `task`: tasks owned by a user, optionally attached to a project
/// - `patch`: helpers for exclude-unset partial updates
///
/// # Relationships
///
/// ```text
/// users ──< projects ──< tasks
///   └───────────────────<┘
///
/// delete user    → cascade projects and tasks
/// delete project → tasks.project_id := NULL
/// ```

pub mod patch;
pub mod project;
pub mod task;
pub mod user;

pub use project::{CreateProject, Project, ProjectFilter, ProjectWithTasks, UpdateProject};
pub use task::{CreateTask, Task, TaskFilter, TaskPriority, TaskStatus, UpdateTask};
pub use user::{CreateUser, User};

/// Default page size for list operations
pub const DEFAULT_LIMIT: i64 = 100;

/// Largest page a caller may request
pub const MAX_LIMIT: i64 = 1000;

/// Offset/limit window over a creation-ordered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Number of rows to skip
    pub offset: i64,

    /// Maximum number of rows to return
    pub limit: i64,
}

impl Page {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}
