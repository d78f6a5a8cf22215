/// Read-only checks run by the services before a write
///
/// Existence checks answer "does the referenced entity exist right now"; the
/// store repeats the check atomically with the write, so these exist to fail
/// fast with a precise error and never to guard integrity on their own.
///
/// The remaining helpers turn raw, partially-null input into typed values,
/// producing `DomainError::Validation` before any store access.

use crate::error::{DomainError, DomainResult, EntityKind};
use crate::store::Store;
use tracing::warn;

pub async fn user_exists(store: &dyn Store, id: i64) -> DomainResult<bool> {
    store.user_exists(id).await
}

pub async fn project_exists(store: &dyn Store, id: i64) -> DomainResult<bool> {
    store.project_exists(id).await
}

/// `NotFound(user)` unless the user exists
pub async fn ensure_user_exists(store: &dyn Store, id: i64) -> DomainResult<()> {
    if user_exists(store, id).await? {
        Ok(())
    } else {
        warn!(user_id = id, "Referenced user does not exist");
        Err(DomainError::not_found(EntityKind::User, id))
    }
}

/// `NotFound(project)` unless the project exists
pub async fn ensure_project_exists(store: &dyn Store, id: i64) -> DomainResult<()> {
    if project_exists(store, id).await? {
        Ok(())
    } else {
        warn!(project_id = id, "Referenced project does not exist");
        Err(DomainError::not_found(EntityKind::Project, id))
    }
}

/// Unwraps a supplied value of a non-nullable field
///
/// `None` (field absent) passes through; `Some(None)` (explicit null) is
/// rejected because the column cannot hold null.
pub fn non_null<T>(field: &str, value: Option<Option<T>>) -> DomainResult<Option<T>> {
    match value {
        None => Ok(None),
        Some(Some(value)) => Ok(Some(value)),
        Some(None) => Err(DomainError::validation(field, "must not be null")),
    }
}

/// Character-count bounds on a text field
pub fn check_length(field: &str, value: &str, min: usize, max: usize) -> DomainResult<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(DomainError::validation(
            field,
            format!("length must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateUser;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_existence_checks() {
        let store = MemoryStore::new();
        let user = store
            .insert_user(CreateUser {
                username: "u".to_string(),
                email: "u@example.com".to_string(),
                hashed_password: "h".to_string(),
            })
            .await
            .unwrap();

        assert!(user_exists(&store, user.id).await.unwrap());
        assert!(!project_exists(&store, 1).await.unwrap());
        assert!(ensure_user_exists(&store, user.id).await.is_ok());

        let err = ensure_user_exists(&store, 99).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: EntityKind::User, id: 99 }));

        let err = ensure_project_exists(&store, 3).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: EntityKind::Project, id: 3 }));
    }

    #[test]
    fn test_non_null() {
        assert_eq!(non_null::<i32>("x", None).unwrap(), None);
        assert_eq!(non_null("x", Some(Some(5))).unwrap(), Some(5));

        let err = non_null::<i32>("title", Some(None)).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_check_length() {
        assert!(check_length("title", "ok", 1, 100).is_ok());
        assert!(check_length("title", "", 1, 100).is_err());
        assert!(check_length("title", &"x".repeat(101), 1, 100).is_err());
        // Counts characters, not bytes
        assert!(check_length("title", "ééé", 1, 3).is_ok());
    }
}
