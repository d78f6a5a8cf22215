/// Welcome document
///
/// ```text
/// GET /
/// ```

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub users: &'static str,
    pub projects: &'static str,
    pub tasks: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

pub async fn index() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to the Taskboard API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            users: "/users",
            projects: "/projects",
            tasks: "/tasks",
        },
    })
}
