/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_api::{app::{build_router, AppState}, config::Config};
/// use taskboard_shared::store::MemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config)?;
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use taskboard_shared::auth::password::{Argon2Hasher, PasswordError};
use taskboard_shared::services::{ProjectService, TaskService, UserService};
use taskboard_shared::store::Store;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Every field is an `Arc` or wraps one, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Backing store, also used directly by the health check
    pub store: Arc<dyn Store>,

    pub users: UserService,

    pub projects: ProjectService,

    pub tasks: TaskService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state over `store`
    ///
    /// # Errors
    ///
    /// Returns an error if the configured Argon2 costs are out of range.
    pub fn new(store: Arc<dyn Store>, config: Config) -> Result<Self, PasswordError> {
        let hasher = Argon2Hasher::new(config.password)?;

        Ok(Self {
            users: UserService::new(store.clone(), hasher),
            projects: ProjectService::new(store.clone()),
            tasks: TaskService::new(store.clone()),
            store,
            config: Arc::new(config),
        })
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET    /                         # Welcome document
/// ├── GET    /health                   # Health check
/// ├── /users
/// │   ├── POST   /users                # Register
/// │   ├── GET    /users                # List
/// │   ├── GET    /users/:user_id
/// │   └── DELETE /users/:user_id       # Cascades to projects and tasks
/// ├── /projects
/// │   ├── POST   /projects?user_id=
/// │   ├── GET    /projects
/// │   ├── GET    /projects/user/:user_id
/// │   ├── GET    /projects/:project_id # Includes tasks
/// │   ├── PUT    /projects/:project_id
/// │   └── DELETE /projects/:project_id # Detaches tasks
/// └── /tasks
///     ├── POST   /tasks?user_id=
///     ├── GET    /tasks?status&project_id
///     ├── GET    /tasks/user/:user_id
///     ├── GET    /tasks/:task_id
///     ├── PUT    /tasks/:task_id       # Partial update
///     └── DELETE /tasks/:task_id
/// ```
///
/// # Middleware Stack
///
/// Outermost first:
/// 1. Request id (`x-request-id`, generated when absent)
/// 2. Logging (tower-http TraceLayer)
/// 3. Request id propagation onto the response
/// 4. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{health, projects, root, tasks, users};

    let user_routes = Router::new()
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/:user_id",
            get(users::get_user).delete(users::delete_user),
        );

    let project_routes = Router::new()
        .route(
            "/projects",
            post(projects::create_project).get(projects::list_projects),
        )
        .route("/projects/user/:user_id", get(projects::list_user_projects))
        .route(
            "/projects/:project_id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        );

    let task_routes = Router::new()
        .route("/tasks", post(tasks::create_task).get(tasks::list_tasks))
        .route("/tasks/user/:user_id", get(tasks::list_user_tasks))
        .route(
            "/tasks/:task_id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        );

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .route("/", get(root::index))
        .route("/health", get(health::health_check))
        .merge(user_routes)
        .merge(project_routes)
        .merge(task_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
        .with_state(state)
}

/// `*` anywhere in the list allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
