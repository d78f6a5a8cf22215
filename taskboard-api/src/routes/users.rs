/// User endpoints
///
/// # Endpoints
///
/// - `POST /users` - Register a user
/// - `GET /users?skip&limit` - List users
/// - `GET /users/:user_id` - Get a user
/// - `DELETE /users/:user_id` - Delete a user with its projects and tasks
///
/// Responses never include the password hash.

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{Path, ValidatedJson, ValidatedQuery},
    routes::PaginationQuery,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::models::User;
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,

    /// Plain-text password; only its hash is stored
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Register a user
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `409 Conflict`: Username or email already exists
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state
        .users
        .create(&req.username, &req.email, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PaginationQuery>,
) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.list(query.page()).await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<User>> {
    let user = state.users.get(user_id).await?;
    Ok(Json(user))
}

/// Delete a user; its projects and tasks go with it
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.users.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
