/// Task endpoints
///
/// # Endpoints
///
/// - `POST /tasks?user_id=` - Create a task owned by `user_id`
/// - `GET /tasks?skip&limit&status&project_id` - List tasks
/// - `GET /tasks/user/:user_id?status` - List a user's tasks
/// - `GET /tasks/:task_id` - Get a task
/// - `PUT /tasks/:task_id` - Update the supplied fields only
/// - `DELETE /tasks/:task_id` - Delete a task
///
/// # Partial updates
///
/// `PUT /tasks/:task_id` applies exactly the keys present in the body:
///
/// ```json
/// { "status": "completed", "project_id": null }
/// ```
///
/// sets the status, detaches the task from its project, and leaves every other
/// field as it was. `null` is accepted for `description`, `due_date`, and
/// `project_id`; for `title`, `status`, and `priority` it is a validation error.

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{Json as JsonBody, Path, ValidatedJson, ValidatedQuery},
    routes::{default_limit, OwnerQuery},
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use taskboard_shared::error::DomainResult;
use taskboard_shared::models::patch::double_option;
use taskboard_shared::models::{CreateTask, Page, Task, TaskPriority, TaskStatus, UpdateTask};
use taskboard_shared::validation::{check_length, non_null};
use validator::Validate;

const TITLE_MAX: usize = 100;

/// Create task request
///
/// Omitted `status` / `priority` default to `pending` / `medium`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub priority: Option<TaskPriority>,

    /// `YYYY-MM-DD`
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub project_id: Option<i64>,
}

/// Exclude-unset update body
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub status: Option<Option<TaskStatus>>,

    #[serde(default, deserialize_with = "double_option")]
    pub priority: Option<Option<TaskPriority>>,

    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "double_option")]
    pub project_id: Option<Option<i64>>,
}

impl UpdateTaskRequest {
    /// Validates the body and converts it into a store patch
    pub fn into_update(self) -> DomainResult<UpdateTask> {
        let title = non_null("title", self.title)?;
        if let Some(title) = &title {
            check_length("title", title, 1, TITLE_MAX)?;
        }

        Ok(UpdateTask {
            title,
            description: self.description,
            status: non_null("status", self.status)?,
            priority: non_null("priority", self.priority)?,
            due_date: self.due_date,
            project_id: self.project_id,
        })
    }
}

/// `GET /tasks` query
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskListQuery {
    #[serde(default)]
    #[validate(range(min = 0, message = "skip must be non-negative"))]
    pub skip: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 0, max = 1000, message = "limit must be between 0 and 1000"))]
    pub limit: i64,

    pub status: Option<TaskStatus>,

    pub project_id: Option<i64>,
}

/// `GET /tasks/user/:user_id` query
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StatusQuery {
    pub status: Option<TaskStatus>,
}

/// Create a task
///
/// # Errors
///
/// - `404 Not Found`: Owner or referenced project does not exist
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedQuery(owner): ValidatedQuery<OwnerQuery>,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state
        .tasks
        .create(CreateTask {
            title: req.title,
            description: req.description,
            status: req.status.unwrap_or_default(),
            priority: req.priority.unwrap_or_default(),
            due_date: req.due_date,
            project_id: req.project_id,
            user_id: owner.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// List tasks; `status` and `project_id` filters combine with AND
pub async fn list_tasks(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TaskListQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state
        .tasks
        .list(Page::new(query.skip, query.limit), query.status, query.project_id)
        .await?;

    Ok(Json(tasks))
}

pub async fn list_user_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    ValidatedQuery(query): ValidatedQuery<StatusQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list_by_user(user_id, query.status).await?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.get(task_id).await?;
    Ok(Json(task))
}

/// Update the fields present in the body
///
/// # Errors
///
/// - `404 Not Found`: Task or referenced project does not exist
/// - `422 Unprocessable Entity`: Bad value, or `null` for a required field
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let update = req.into_update()?;
    let task = state.tasks.update(task_id, update).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.tasks.delete(task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taskboard_shared::error::DomainError;

    fn parse(body: serde_json::Value) -> UpdateTaskRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_update_only_sets_present_keys() {
        let update = parse(json!({ "status": "completed" })).into_update().unwrap();

        assert_eq!(
            update,
            UpdateTask {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_update_null_clears_nullable_fields() {
        let update = parse(json!({
            "description": null,
            "due_date": null,
            "project_id": null
        }))
        .into_update()
        .unwrap();

        assert_eq!(update.description, Some(None));
        assert_eq!(update.due_date, Some(None));
        assert_eq!(update.project_id, Some(None));
        assert_eq!(update.title, None);
    }

    #[test]
    fn test_update_rejects_null_required_fields() {
        for field in ["title", "status", "priority"] {
            let mut body = serde_json::Map::new();
            body.insert(field.to_string(), serde_json::Value::Null);

            let err = parse(body.into()).into_update().unwrap_err();
            assert!(
                matches!(err, DomainError::Validation { field: ref f, .. } if f == field),
                "expected validation error for {}",
                field
            );
        }
    }

    #[test]
    fn test_update_title_length() {
        assert!(parse(json!({ "title": "" })).into_update().is_err());
        assert!(parse(json!({ "title": "x".repeat(101) })).into_update().is_err());
        assert!(parse(json!({ "title": "x".repeat(100) })).into_update().is_ok());
    }

    #[test]
    fn test_update_rejects_unknown_enum_values() {
        assert!(serde_json::from_value::<UpdateTaskRequest>(json!({ "status": "done" })).is_err());
        assert!(serde_json::from_value::<UpdateTaskRequest>(json!({ "priority": "urgent" })).is_err());
        assert!(
            serde_json::from_value::<UpdateTaskRequest>(json!({ "due_date": "31/12/2025" })).is_err()
        );
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateTaskRequest = serde_json::from_value(json!({ "title": "t" })).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.status.unwrap_or_default(), TaskStatus::Pending);
        assert_eq!(req.priority.unwrap_or_default(), TaskPriority::Medium);
        assert_eq!(req.project_id, None);
    }
}
