use crate::error::{DomainError, DomainResult, EntityKind};
use crate::models::{CreateTask, Page, Task, TaskFilter, TaskStatus, UpdateTask};
use crate::store::Store;
use crate::validation::{ensure_project_exists, ensure_user_exists};
use std::sync::Arc;
use tracing::{debug, info};

/// Tasks, filtered listings, and exclude-unset updates
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a task owned by `data.user_id`
    ///
    /// # Errors
    ///
    /// - `NotFound(user)` if the owner does not exist
    /// - `NotFound(project)` if `project_id` is set and the project does not exist
    pub async fn create(&self, data: CreateTask) -> DomainResult<Task> {
        ensure_user_exists(self.store.as_ref(), data.user_id).await?;
        if let Some(project_id) = data.project_id {
            ensure_project_exists(self.store.as_ref(), project_id).await?;
        }

        let task = self.store.insert_task(data).await?;

        info!(
            task_id = task.id,
            user_id = task.user_id,
            project_id = ?task.project_id,
            "Created task"
        );
        Ok(task)
    }

    /// Lists tasks in creation order, optionally narrowed by status and project
    pub async fn list(
        &self,
        page: Page,
        status: Option<TaskStatus>,
        project_id: Option<i64>,
    ) -> DomainResult<Vec<Task>> {
        debug!(
            offset = page.offset,
            limit = page.limit,
            status = ?status,
            project_id = ?project_id,
            "Listing tasks"
        );
        self.store
            .list_tasks(TaskFilter {
                user_id: None,
                project_id,
                status,
                page: Some(page),
            })
            .await
    }

    /// Every task owned by `user_id`; empty for unknown users
    pub async fn list_by_user(
        &self,
        user_id: i64,
        status: Option<TaskStatus>,
    ) -> DomainResult<Vec<Task>> {
        self.store
            .list_tasks(TaskFilter {
                user_id: Some(user_id),
                status,
                ..Default::default()
            })
            .await
    }

    pub async fn get(&self, id: i64) -> DomainResult<Task> {
        self.store
            .get_task(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Task, id))
    }

    /// Applies only the fields present in `data`
    ///
    /// # Errors
    ///
    /// - `NotFound(task)` if the task does not exist
    /// - `NotFound(project)` if the update points at a missing project; the
    ///   task is left unchanged
    pub async fn update(&self, id: i64, data: UpdateTask) -> DomainResult<Task> {
        // Existing task first so a missing task wins over a missing project
        self.get(id).await?;
        if let Some(project_id) = data.referenced_project() {
            ensure_project_exists(self.store.as_ref(), project_id).await?;
        }

        let task = self
            .store
            .update_task(id, data)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Task, id))?;

        info!(task_id = id, status = %task.status, "Updated task");
        Ok(task)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.store.delete_task(id).await? {
            return Err(DomainError::not_found(EntityKind::Task, id));
        }

        info!(task_id = id, "Deleted task");
        Ok(())
    }
}
