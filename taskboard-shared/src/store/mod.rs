/// Persistence for users, projects, and tasks
///
/// [`Store`] is the seam between the services and storage. Two
/// implementations exist:
///
/// - [`PgStore`]: PostgreSQL through sqlx; foreign keys declared in the
///   schema perform the cascade and nullify rules
/// - [`MemoryStore`]: in-process tables behind one lock; the same rules are
///   applied imperatively
///
/// # Referential rules
///
/// - inserting a project or task whose owner does not exist fails with
///   `NotFound(user)`
/// - inserting or updating a task to reference a missing project fails with
///   `NotFound(project)`
/// - deleting a user deletes its projects and tasks
/// - deleting a project clears `project_id` on its tasks
///
/// Reference checks happen inside the same atomic write as the mutation, so a
/// concurrent delete cannot leave a dangling reference behind.
///
/// # Ordering
///
/// Listings are returned in creation order (ascending id).

use crate::error::DomainResult;
use crate::models::{
    CreateProject, CreateTask, CreateUser, Page, Project, ProjectFilter, Task, TaskFilter,
    UpdateProject, UpdateTask, User,
};
use async_trait::async_trait;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Checks the backing storage is reachable
    async fn ping(&self) -> DomainResult<()>;

    /// Inserts a user; `Conflict` if username or email is taken
    async fn insert_user(&self, data: CreateUser) -> DomainResult<User>;

    async fn get_user(&self, id: i64) -> DomainResult<Option<User>>;

    async fn list_users(&self, page: Page) -> DomainResult<Vec<User>>;

    async fn user_exists(&self, id: i64) -> DomainResult<bool>;

    /// Deletes a user and everything it owns; false if absent
    async fn delete_user(&self, id: i64) -> DomainResult<bool>;

    async fn insert_project(&self, data: CreateProject) -> DomainResult<Project>;

    async fn get_project(&self, id: i64) -> DomainResult<Option<Project>>;

    async fn list_projects(&self, filter: ProjectFilter) -> DomainResult<Vec<Project>>;

    async fn project_exists(&self, id: i64) -> DomainResult<bool>;

    /// Replaces name and description; `None` if the project is absent
    async fn update_project(&self, id: i64, data: UpdateProject) -> DomainResult<Option<Project>>;

    /// Deletes a project and detaches its tasks; false if absent
    async fn delete_project(&self, id: i64) -> DomainResult<bool>;

    async fn insert_task(&self, data: CreateTask) -> DomainResult<Task>;

    async fn get_task(&self, id: i64) -> DomainResult<Option<Task>>;

    async fn list_tasks(&self, filter: TaskFilter) -> DomainResult<Vec<Task>>;

    /// Applies the supplied fields; `None` if the task is absent
    async fn update_task(&self, id: i64, data: UpdateTask) -> DomainResult<Option<Task>>;

    async fn delete_task(&self, id: i64) -> DomainResult<bool>;
}
