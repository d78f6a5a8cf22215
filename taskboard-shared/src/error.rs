/// Domain error taxonomy
///
/// Every store, validation, and service operation returns [`DomainResult`].
/// The API crate maps each variant onto an HTTP status; nothing in this crate
/// knows about transport.
///
/// # Variants
///
/// - `NotFound`: the requested entity, or an entity it references, is absent
/// - `Conflict`: a store-wide uniqueness rule was violated
/// - `Validation`: malformed input, raised before the store is touched
/// - `Store` / `Password` / `Internal`: infrastructure failures

use crate::auth::password::PasswordError;
use std::fmt;

/// Result alias used across the shared crate
pub type DomainResult<T> = Result<T, DomainError>;

/// Kind of entity named in a not-found error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Project,
    Task,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Project => "project",
            EntityKind::Task => "task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Requested or referenced entity does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: i64 },

    /// Uniqueness violation on the named field
    #[error("{field} already exists")]
    Conflict { field: &'static str },

    /// Input rejected before reaching the store
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("storage error: {0}")]
    Store(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        DomainError::NotFound { entity, id }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_entity_and_id() {
        let err = DomainError::not_found(EntityKind::Project, 42);
        assert_eq!(err.to_string(), "project 42 not found");
    }

    #[test]
    fn test_conflict_names_field() {
        let err = DomainError::Conflict { field: "email" };
        assert_eq!(err.to_string(), "email already exists");
    }

    #[test]
    fn test_validation_message() {
        let err = DomainError::validation("title", "must not be null");
        assert_eq!(err.to_string(), "invalid title: must not be null");
    }
}
