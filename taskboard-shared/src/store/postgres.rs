/// PostgreSQL implementation of [`Store`]
///
/// Cascades are declared in the schema (`migrations/`):
///
/// - `projects.user_id` and `tasks.user_id`: `ON DELETE CASCADE`
/// - `tasks.project_id`: `ON DELETE SET NULL`
///
/// Constraint violations raised by Postgres are translated into domain errors
/// by [`translate_write_error`], which is what closes the window between a
/// service-level existence check and the insert.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskboard_shared::store::{PgStore, Store};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgStore::new(pool);
/// store.ping().await?;
/// # Ok(())
/// # }
/// ```

use crate::db::pool::health_check;
use crate::error::{DomainError, DomainResult, EntityKind};
use crate::models::{
    CreateProject, CreateTask, CreateUser, Page, Project, ProjectFilter, Task, TaskFilter,
    UpdateProject, UpdateTask, User,
};
use crate::store::Store;
use async_trait::async_trait;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, username, email, hashed_password, created_at";
const PROJECT_COLUMNS: &str = "id, name, description, user_id, created_at";
const TASK_COLUMNS: &str =
    "id, title, description, status, priority, due_date, project_id, user_id, created_at";

/// Store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps unique and foreign-key violations onto domain errors
///
/// `user_id` / `project_id` are the references the failing statement tried
/// to write; they become the id in the resulting `NotFound`.
fn translate_write_error(
    err: sqlx::Error,
    user_id: Option<i64>,
    project_id: Option<i64>,
) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        match (db_err.constraint(), user_id, project_id) {
            (Some("users_username_key"), _, _) => {
                return DomainError::Conflict { field: "username" }
            }
            (Some("users_email_key"), _, _) => return DomainError::Conflict { field: "email" },
            (Some("projects_user_id_fkey" | "tasks_user_id_fkey"), Some(id), _) => {
                return DomainError::not_found(EntityKind::User, id)
            }
            (Some("tasks_project_id_fkey"), _, Some(id)) => {
                return DomainError::not_found(EntityKind::Project, id)
            }
            _ => {}
        }
    }

    DomainError::Store(err)
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> DomainResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }

    async fn insert_user(&self, data: CreateUser) -> DomainResult<User> {
        let query = format!(
            "INSERT INTO users (username, email, hashed_password) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(data.username)
            .bind(data.email)
            .bind(data.hashed_password)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| translate_write_error(e, None, None))
    }

    async fn get_user(&self, id: i64) -> DomainResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn list_users(&self, page: Page) -> DomainResult<Vec<User>> {
        let query = format!(
            "SELECT {} FROM users ORDER BY id LIMIT $1 OFFSET $2",
            USER_COLUMNS
        );

        let users = sqlx::query_as::<_, User>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn user_exists(&self, id: i64) -> DomainResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn delete_user(&self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_project(&self, data: CreateProject) -> DomainResult<Project> {
        let query = format!(
            "INSERT INTO projects (name, description, user_id) VALUES ($1, $2, $3) RETURNING {}",
            PROJECT_COLUMNS
        );

        sqlx::query_as::<_, Project>(&query)
            .bind(data.name)
            .bind(data.description)
            .bind(data.user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| translate_write_error(e, Some(data.user_id), None))
    }

    async fn get_project(&self, id: i64) -> DomainResult<Option<Project>> {
        let query = format!("SELECT {} FROM projects WHERE id = $1", PROJECT_COLUMNS);

        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn list_projects(&self, filter: ProjectFilter) -> DomainResult<Vec<Project>> {
        // NULL limit/offset mean "all rows" / "from the start" in Postgres
        let query = format!(
            r#"
            SELECT {}
            FROM projects
            WHERE ($1::BIGINT IS NULL OR user_id = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
            PROJECT_COLUMNS
        );

        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(filter.user_id)
            .bind(filter.page.map(|p| p.limit))
            .bind(filter.page.map(|p| p.offset))
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn project_exists(&self, id: i64) -> DomainResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_project(&self, id: i64, data: UpdateProject) -> DomainResult<Option<Project>> {
        let query = format!(
            "UPDATE projects SET name = $2, description = $3 WHERE id = $1 RETURNING {}",
            PROJECT_COLUMNS
        );

        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(data.name)
            .bind(data.description)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn delete_project(&self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_task(&self, data: CreateTask) -> DomainResult<Task> {
        let query = format!(
            r#"
            INSERT INTO tasks (title, description, status, priority, due_date, project_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            TASK_COLUMNS
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(data.title)
            .bind(data.description)
            .bind(data.status)
            .bind(data.priority)
            .bind(data.due_date)
            .bind(data.project_id)
            .bind(data.user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| translate_write_error(e, Some(data.user_id), data.project_id))
    }

    async fn get_task(&self, id: i64) -> DomainResult<Option<Task>> {
        let query = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);

        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(task)
    }

    async fn list_tasks(&self, filter: TaskFilter) -> DomainResult<Vec<Task>> {
        let query = format!(
            r#"
            SELECT {}
            FROM tasks
            WHERE ($1::BIGINT IS NULL OR user_id = $1)
              AND ($2::BIGINT IS NULL OR project_id = $2)
              AND ($3::task_status IS NULL OR status = $3)
            ORDER BY id
            LIMIT $4 OFFSET $5
            "#,
            TASK_COLUMNS
        );

        let tasks = sqlx::query_as::<_, Task>(&query)
            .bind(filter.user_id)
            .bind(filter.project_id)
            .bind(filter.status)
            .bind(filter.page.map(|p| p.limit))
            .bind(filter.page.map(|p| p.offset))
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn update_task(&self, id: i64, data: UpdateTask) -> DomainResult<Option<Task>> {
        if data.is_empty() {
            return self.get_task(id).await;
        }

        // Build dynamic update query based on which fields are present
        let mut assignments = Vec::new();
        let mut bind_count = 1;
        let mut assign = |column: &str| {
            bind_count += 1;
            assignments.push(format!("{} = ${}", column, bind_count));
        };

        if data.title.is_some() {
            assign("title");
        }
        if data.description.is_some() {
            assign("description");
        }
        if data.status.is_some() {
            assign("status");
        }
        if data.priority.is_some() {
            assign("priority");
        }
        if data.due_date.is_some() {
            assign("due_date");
        }
        if data.project_id.is_some() {
            assign("project_id");
        }

        let query = format!(
            "UPDATE tasks SET {} WHERE id = $1 RETURNING {}",
            assignments.join(", "),
            TASK_COLUMNS
        );

        let referenced_project = data.referenced_project();
        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }
        if let Some(project_id) = data.project_id {
            q = q.bind(project_id);
        }

        q.fetch_optional(&self.pool)
            .await
            .map_err(|e| translate_write_error(e, None, referenced_project))
    }

    async fn delete_task(&self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
