use crate::error::{DomainError, DomainResult, EntityKind};
use crate::models::{
    CreateProject, Page, Project, ProjectFilter, ProjectWithTasks, TaskFilter, UpdateProject,
};
use crate::store::Store;
use crate::validation::ensure_user_exists;
use std::sync::Arc;
use tracing::{debug, info};

/// Projects and their task listings
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn Store>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a project owned by `data.user_id`
    ///
    /// # Errors
    ///
    /// `NotFound(user)` if the owner does not exist
    pub async fn create(&self, data: CreateProject) -> DomainResult<Project> {
        ensure_user_exists(self.store.as_ref(), data.user_id).await?;

        let project = self.store.insert_project(data).await?;

        info!(project_id = project.id, user_id = project.user_id, "Created project");
        Ok(project)
    }

    pub async fn list(&self, page: Page) -> DomainResult<Vec<Project>> {
        debug!(offset = page.offset, limit = page.limit, "Listing projects");
        self.store
            .list_projects(ProjectFilter {
                user_id: None,
                page: Some(page),
            })
            .await
    }

    /// Every project owned by `user_id`; empty for unknown users
    pub async fn list_by_user(&self, user_id: i64) -> DomainResult<Vec<Project>> {
        self.store
            .list_projects(ProjectFilter {
                user_id: Some(user_id),
                page: None,
            })
            .await
    }

    /// Fetches a project with its tasks
    pub async fn get(&self, id: i64) -> DomainResult<ProjectWithTasks> {
        let project = self
            .store
            .get_project(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Project, id))?;

        let tasks = self
            .store
            .list_tasks(TaskFilter {
                project_id: Some(id),
                ..Default::default()
            })
            .await?;

        Ok(ProjectWithTasks { project, tasks })
    }

    /// Replaces name and description
    pub async fn update(&self, id: i64, data: UpdateProject) -> DomainResult<Project> {
        let project = self
            .store
            .update_project(id, data)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Project, id))?;

        info!(project_id = id, "Updated project");
        Ok(project)
    }

    /// Deletes the project; its tasks survive with `project_id` cleared
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.store.delete_project(id).await? {
            return Err(DomainError::not_found(EntityKind::Project, id));
        }

        info!(project_id = id, "Deleted project");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateTask, TaskPriority, TaskStatus};
    use crate::services::test_support::{create_user, memory_store};

    fn project_input(user_id: i64, name: &str, description: Option<&str>) -> CreateProject {
        CreateProject {
            name: name.to_string(),
            description: description.map(str::to_string),
            user_id,
        }
    }

    #[tokio::test]
    async fn test_create_requires_owner() {
        let store = memory_store();
        let service = ProjectService::new(store.clone());

        let err = service.create(project_input(9, "X", None)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: EntityKind::User, id: 9 }));
        assert!(service.list(Page::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let store = memory_store();
        let user = create_user(&store, "owner").await;
        let service = ProjectService::new(store.clone());

        let created = service
            .create(project_input(user.id, "X", Some("Y")))
            .await
            .unwrap();
        let fetched = service.get(created.id).await.unwrap();

        assert_eq!(fetched.project, created);
        assert_eq!(fetched.project.name, "X");
        assert_eq!(fetched.project.description.as_deref(), Some("Y"));
        assert_eq!(fetched.project.user_id, user.id);
        assert!(fetched.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_get_includes_tasks() {
        let store = memory_store();
        let user = create_user(&store, "owner").await;
        let service = ProjectService::new(store.clone());
        let project = service.create(project_input(user.id, "p", None)).await.unwrap();

        for title in ["first", "second"] {
            store
                .insert_task(CreateTask {
                    title: title.to_string(),
                    description: None,
                    status: TaskStatus::Pending,
                    priority: TaskPriority::Medium,
                    due_date: None,
                    project_id: Some(project.id),
                    user_id: user.id,
                })
                .await
                .unwrap();
        }

        let fetched = service.get(project.id).await.unwrap();
        let titles: Vec<_> = fetched.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_update_replaces_description() {
        let store = memory_store();
        let user = create_user(&store, "owner").await;
        let service = ProjectService::new(store.clone());
        let project = service
            .create(project_input(user.id, "old", Some("desc")))
            .await
            .unwrap();

        let updated = service
            .update(
                project.id,
                UpdateProject {
                    name: "new".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "new");
        assert_eq!(updated.description, None);
        assert_eq!(updated.user_id, user.id);
        assert_eq!(updated.created_at, project.created_at);

        let err = service
            .update(
                999,
                UpdateProject {
                    name: "n".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: EntityKind::Project, id: 999 }));
    }

    #[tokio::test]
    async fn test_list_by_user() {
        let store = memory_store();
        let alice = create_user(&store, "alice").await;
        let bob = create_user(&store, "bob").await;
        let service = ProjectService::new(store.clone());

        service.create(project_input(alice.id, "a1", None)).await.unwrap();
        service.create(project_input(bob.id, "b1", None)).await.unwrap();
        service.create(project_input(alice.id, "a2", None)).await.unwrap();

        let names: Vec<_> = service
            .list_by_user(alice.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a1", "a2"]);
        assert!(service.list_by_user(404).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_project() {
        let store = memory_store();
        let err = ProjectService::new(store).delete(1).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: EntityKind::Project, id: 1 }));
    }
}
