/// User model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(50) NOT NULL CONSTRAINT users_username_key UNIQUE,
///     email VARCHAR(100) NOT NULL CONSTRAINT users_email_key UNIQUE,
///     hashed_password VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User account
///
/// Serializing a `User` never emits the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    /// Server-generated, monotonically increasing ID
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Argon2id PHC string
    #[serde(skip_serializing)]
    pub hashed_password: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a user
///
/// Carries the already-hashed credential, never the plaintext password.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub hashed_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_omits_password_hash() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            hashed_password: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert_eq!(json["username"], "alice");
        assert_eq!(json["email"], "alice@example.com");
        assert!(object.get("hashed_password").is_none());
        assert!(!json.to_string().contains("argon2"));
    }
}
