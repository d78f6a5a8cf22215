/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `root`: Welcome document
/// - `health`: Health check endpoint
/// - `users`: User accounts
/// - `projects`: Projects and their tasks
/// - `tasks`: Tasks with filtering and partial updates

pub mod health;
pub mod projects;
pub mod root;
pub mod tasks;
pub mod users;

use serde::Deserialize;
use taskboard_shared::models::{Page, DEFAULT_LIMIT};
use validator::Validate;

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// `?skip=&limit=` window shared by the list endpoints
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationQuery {
    /// Rows to skip
    #[serde(default)]
    #[validate(range(min = 0, message = "skip must be non-negative"))]
    pub skip: i64,

    /// Maximum rows to return
    #[serde(default = "default_limit")]
    #[validate(range(min = 0, max = 1000, message = "limit must be between 0 and 1000"))]
    pub limit: i64,
}

impl PaginationQuery {
    pub fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

/// `?user_id=` naming the owner of a new project or task
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct OwnerQuery {
    pub user_id: i64,
}
