use crate::error::{DomainError, DomainResult, EntityKind};
use crate::models::{
    CreateProject, CreateTask, CreateUser, Page, Project, ProjectFilter, Task, TaskFilter,
    UpdateProject, UpdateTask, User,
};
use crate::store::Store;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    projects: BTreeMap<i64, Project>,
    tasks: BTreeMap<i64, Task>,
    last_user_id: i64,
    last_project_id: i64,
    last_task_id: i64,
}

impl Tables {
    fn require_user(&self, id: i64) -> DomainResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::not_found(EntityKind::User, id))
        }
    }

    fn require_project(&self, id: i64) -> DomainResult<()> {
        if self.projects.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::not_found(EntityKind::Project, id))
        }
    }
}

/// In-memory store for development and tests
///
/// All tables share one lock, so cascades and reference checks are atomic with
/// the write that triggers them. BTreeMaps keyed by id keep iteration in
/// creation order. Clones share the same tables.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn paginate<'a, T, I>(rows: I, page: Option<Page>) -> Vec<T>
where
    T: Clone + 'a,
    I: Iterator<Item = &'a T>,
{
    match page {
        Some(page) => {
            let offset = usize::try_from(page.offset).unwrap_or(0);
            let limit = usize::try_from(page.limit).unwrap_or(0);
            rows.skip(offset).take(limit).cloned().collect()
        }
        None => rows.cloned().collect(),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }

    async fn insert_user(&self, data: CreateUser) -> DomainResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.username == data.username) {
            return Err(DomainError::Conflict { field: "username" });
        }
        if tables.users.values().any(|u| u.email == data.email) {
            return Err(DomainError::Conflict { field: "email" });
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            username: data.username,
            email: data.email,
            hashed_password: data.hashed_password,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_user(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn list_users(&self, page: Page) -> DomainResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.users.values(), Some(page)))
    }

    async fn user_exists(&self, id: i64) -> DomainResult<bool> {
        Ok(self.tables.read().await.users.contains_key(&id))
    }

    async fn delete_user(&self, id: i64) -> DomainResult<bool> {
        let mut tables = self.tables.write().await;

        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }

        let owned_projects: Vec<i64> = tables
            .projects
            .values()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        for project_id in &owned_projects {
            tables.projects.remove(project_id);
        }

        // Tasks of other users may point at the removed projects
        tables.tasks.retain(|_, task| task.user_id != id);
        for task in tables.tasks.values_mut() {
            if task.project_id.is_some_and(|pid| owned_projects.contains(&pid)) {
                task.project_id = None;
            }
        }

        Ok(true)
    }

    async fn insert_project(&self, data: CreateProject) -> DomainResult<Project> {
        let mut tables = self.tables.write().await;
        tables.require_user(data.user_id)?;

        tables.last_project_id += 1;
        let project = Project {
            id: tables.last_project_id,
            name: data.name,
            description: data.description,
            user_id: data.user_id,
            created_at: Utc::now(),
        };
        tables.projects.insert(project.id, project.clone());

        Ok(project)
    }

    async fn get_project(&self, id: i64) -> DomainResult<Option<Project>> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn list_projects(&self, filter: ProjectFilter) -> DomainResult<Vec<Project>> {
        let tables = self.tables.read().await;
        let rows = tables
            .projects
            .values()
            .filter(|p| filter.user_id.map_or(true, |id| p.user_id == id));

        Ok(paginate(rows, filter.page))
    }

    async fn project_exists(&self, id: i64) -> DomainResult<bool> {
        Ok(self.tables.read().await.projects.contains_key(&id))
    }

    async fn update_project(&self, id: i64, data: UpdateProject) -> DomainResult<Option<Project>> {
        let mut tables = self.tables.write().await;

        Ok(tables.projects.get_mut(&id).map(|project| {
            project.name = data.name;
            project.description = data.description;
            project.clone()
        }))
    }

    async fn delete_project(&self, id: i64) -> DomainResult<bool> {
        let mut tables = self.tables.write().await;

        if tables.projects.remove(&id).is_none() {
            return Ok(false);
        }

        for task in tables.tasks.values_mut() {
            if task.project_id == Some(id) {
                task.project_id = None;
            }
        }

        Ok(true)
    }

    async fn insert_task(&self, data: CreateTask) -> DomainResult<Task> {
        let mut tables = self.tables.write().await;
        tables.require_user(data.user_id)?;
        if let Some(project_id) = data.project_id {
            tables.require_project(project_id)?;
        }

        tables.last_task_id += 1;
        let task = Task {
            id: tables.last_task_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            project_id: data.project_id,
            user_id: data.user_id,
            created_at: Utc::now(),
        };
        tables.tasks.insert(task.id, task.clone());

        Ok(task)
    }

    async fn get_task(&self, id: i64) -> DomainResult<Option<Task>> {
        Ok(self.tables.read().await.tasks.get(&id).cloned())
    }

    async fn list_tasks(&self, filter: TaskFilter) -> DomainResult<Vec<Task>> {
        let tables = self.tables.read().await;
        let rows = tables.tasks.values().filter(|t| filter.matches(t));

        Ok(paginate(rows, filter.page))
    }

    async fn update_task(&self, id: i64, data: UpdateTask) -> DomainResult<Option<Task>> {
        let mut tables = self.tables.write().await;

        if !tables.tasks.contains_key(&id) {
            return Ok(None);
        }
        if let Some(project_id) = data.referenced_project() {
            tables.require_project(project_id)?;
        }

        Ok(tables.tasks.get_mut(&id).map(|task| {
            data.apply_to(task);
            task.clone()
        }))
    }

    async fn delete_task(&self, id: i64) -> DomainResult<bool> {
        Ok(self.tables.write().await.tasks.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskPriority, TaskStatus};

    async fn seed_user(store: &MemoryStore, name: &str) -> User {
        store
            .insert_user(CreateUser {
                username: name.to_string(),
                email: format!("{}@example.com", name),
                hashed_password: "hash".to_string(),
            })
            .await
            .unwrap()
    }

    fn new_task(user_id: i64, project_id: Option<i64>, title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            due_date: None,
            project_id,
            user_id,
        }
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let store = MemoryStore::new();
        let a = seed_user(&store, "a").await;
        let b = seed_user(&store, "b").await;
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        store.delete_user(b.id).await.unwrap();
        let c = seed_user(&store, "c").await;
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn test_unique_username_and_email() {
        let store = MemoryStore::new();
        seed_user(&store, "alice").await;

        let dup_name = store
            .insert_user(CreateUser {
                username: "alice".to_string(),
                email: "other@example.com".to_string(),
                hashed_password: "hash".to_string(),
            })
            .await;
        assert!(matches!(dup_name, Err(DomainError::Conflict { field: "username" })));

        let dup_email = store
            .insert_user(CreateUser {
                username: "alice2".to_string(),
                email: "alice@example.com".to_string(),
                hashed_password: "hash".to_string(),
            })
            .await;
        assert!(matches!(dup_email, Err(DomainError::Conflict { field: "email" })));

        assert_eq!(store.list_users(Page::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_missing_references() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "owner").await;

        let err = store.insert_task(new_task(99, None, "t")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: EntityKind::User, id: 99 }));

        let err = store
            .insert_task(new_task(user.id, Some(5), "t"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: EntityKind::Project, id: 5 }));

        assert!(store.list_tasks(TaskFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let store = MemoryStore::new();
        let owner = seed_user(&store, "owner").await;
        let other = seed_user(&store, "other").await;

        let project = store
            .insert_project(CreateProject {
                name: "p".to_string(),
                description: None,
                user_id: owner.id,
            })
            .await
            .unwrap();
        store.insert_task(new_task(owner.id, Some(project.id), "mine")).await.unwrap();
        store.insert_task(new_task(owner.id, None, "mine too")).await.unwrap();
        let foreign = store
            .insert_task(new_task(other.id, Some(project.id), "theirs"))
            .await
            .unwrap();

        assert!(store.delete_user(owner.id).await.unwrap());

        assert!(store.get_project(project.id).await.unwrap().is_none());
        let remaining = store.list_tasks(TaskFilter::default()).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, foreign.id);
        assert_eq!(remaining[0].project_id, None);
    }

    #[tokio::test]
    async fn test_delete_project_detaches_tasks() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "owner").await;
        let project = store
            .insert_project(CreateProject {
                name: "p".to_string(),
                description: None,
                user_id: user.id,
            })
            .await
            .unwrap();
        let task = store
            .insert_task(new_task(user.id, Some(project.id), "t"))
            .await
            .unwrap();

        assert!(store.delete_project(project.id).await.unwrap());
        assert!(!store.delete_project(project.id).await.unwrap());

        let task = store.get_task(task.id).await.unwrap().unwrap();
        assert_eq!(task.project_id, None);
    }

    #[tokio::test]
    async fn test_update_task_missing_project_changes_nothing() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "owner").await;
        let task = store.insert_task(new_task(user.id, None, "t")).await.unwrap();

        let err = store
            .update_task(
                task.id,
                UpdateTask {
                    title: Some("renamed".to_string()),
                    project_id: Some(Some(404)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: EntityKind::Project, .. }));

        let unchanged = store.get_task(task.id).await.unwrap().unwrap();
        assert_eq!(unchanged.title, "t");

        assert!(store
            .update_task(404, UpdateTask::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_pagination_window() {
        let store = MemoryStore::new();
        for i in 1..=5 {
            seed_user(&store, &format!("user{}", i)).await;
        }

        let page = store.list_users(Page::new(2, 2)).await.unwrap();
        let names: Vec<_> = page.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["user3", "user4"]);

        assert!(store.list_users(Page::new(10, 2)).await.unwrap().is_empty());
        assert!(store.list_users(Page::new(0, 0)).await.unwrap().is_empty());
    }
}
