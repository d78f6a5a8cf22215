//! Common test utilities for HTTP tests
//!
//! Builds the full router over a fresh `MemoryStore` and drives it with
//! `tower::ServiceExt::oneshot`, so no network or database is involved.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::Config;
use taskboard_shared::store::MemoryStore;
use tower::ServiceExt;

/// Router over an empty in-memory store
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        // Lowest Argon2 costs keep registration fast
        let config = Config::from_vars(|key| {
            let value = match key {
                "STORAGE_BACKEND" => Some("memory"),
                "PASSWORD_MEMORY_KIB" => Some("8"),
                "PASSWORD_ITERATIONS" => Some("1"),
                "PASSWORD_PARALLELISM" => Some("1"),
                _ => None,
            };
            value.map(str::to_string)
        })
        .expect("test config");

        let state = AppState::new(Arc::new(MemoryStore::new()), config).expect("app state");

        Self {
            router: build_router(state),
        }
    }

    /// Sends a request and returns the status with the parsed JSON body
    /// (`Value::Null` for an empty body)
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.send(request).await
    }

    /// Sends a raw body with a JSON content type
    pub async fn request_raw(&self, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Registers `username` and returns its id
    pub async fn create_user(&self, username: &str) -> i64 {
        let (status, body) = self
            .post(
                "/users",
                serde_json::json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": "password123"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create user: {}", body);
        body["id"].as_i64().expect("user id")
    }

    pub async fn create_project(&self, user_id: i64, name: &str) -> i64 {
        let (status, body) = self
            .post(
                &format!("/projects?user_id={}", user_id),
                serde_json::json!({ "name": name }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create project: {}", body);
        body["id"].as_i64().expect("project id")
    }

    pub async fn create_task(&self, user_id: i64, body: Value) -> Value {
        let (status, task) = self
            .post(&format!("/tasks?user_id={}", user_id), body)
            .await;
        assert_eq!(status, StatusCode::CREATED, "create task: {}", task);
        task
    }
}
