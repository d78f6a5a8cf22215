/// Project endpoints
///
/// # Endpoints
///
/// - `POST /projects?user_id=` - Create a project owned by `user_id`
/// - `GET /projects?skip&limit` - List projects
/// - `GET /projects/user/:user_id` - List a user's projects
/// - `GET /projects/:project_id` - Get a project with its tasks
/// - `PUT /projects/:project_id` - Replace name and description
/// - `DELETE /projects/:project_id` - Delete a project; its tasks are detached

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{Path, ValidatedJson, ValidatedQuery},
    routes::{OwnerQuery, PaginationQuery},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::models::{CreateProject, Project, ProjectWithTasks, UpdateProject};
use validator::Validate;

/// Body for both create and full replace
///
/// ```json
/// { "name": "Website", "description": "Relaunch" }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Create a project
///
/// # Errors
///
/// - `404 Not Found`: Owner does not exist
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_project(
    State(state): State<AppState>,
    ValidatedQuery(owner): ValidatedQuery<OwnerQuery>,
    ValidatedJson(req): ValidatedJson<ProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let project = state
        .projects
        .create(CreateProject {
            name: req.name,
            description: req.description,
            user_id: owner.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn list_projects(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PaginationQuery>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = state.projects.list(query.page()).await?;
    Ok(Json(projects))
}

/// Projects owned by a user; unknown users yield an empty list
pub async fn list_user_projects(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = state.projects.list_by_user(user_id).await?;
    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<ProjectWithTasks>> {
    let project = state.projects.get(project_id).await?;
    Ok(Json(project))
}

/// Replace a project's name and description
///
/// An omitted `description` clears it.
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<ProjectRequest>,
) -> ApiResult<Json<Project>> {
    let project = state
        .projects
        .update(
            project_id,
            UpdateProject {
                name: req.name,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.projects.delete(project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
