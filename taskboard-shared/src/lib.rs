//! # Taskboard Shared Library
//!
//! Domain types, persistence, and business rules used by the Taskboard API
//! server.
//!
//! ## Module Organization
//!
//! - `models`: users, projects, tasks, and update/filter inputs
//! - `store`: the `Store` trait with PostgreSQL and in-memory backends
//! - `services`: per-entity operations over a `Store`
//! - `validation`: existence checks and input normalization
//! - `auth`: password hashing
//! - `db`: connection pool and migrations
//! - `error`: domain error type

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod validation;

pub use error::{DomainError, DomainResult, EntityKind};

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
