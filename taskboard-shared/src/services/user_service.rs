use crate::auth::password::Argon2Hasher;
use crate::error::{DomainError, DomainResult, EntityKind};
use crate::models::{CreateUser, Page, User};
use crate::store::Store;
use std::sync::Arc;
use tracing::{debug, info};

/// User accounts
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
    hasher: Argon2Hasher,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>, hasher: Argon2Hasher) -> Self {
        Self { store, hasher }
    }

    /// Registers a user, storing only the Argon2id hash of `password`
    ///
    /// # Errors
    ///
    /// - `Conflict("username")` / `Conflict("email")` if either is taken
    /// - `Password` / `Internal` if hashing fails
    pub async fn create(&self, username: &str, email: &str, password: &str) -> DomainResult<User> {
        // Hashing is CPU-bound; keep it off the async workers
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Internal(format!("password hashing task failed: {}", e)))??;

        let user = self
            .store
            .insert_user(CreateUser {
                username: username.to_owned(),
                email: email.to_owned(),
                hashed_password,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "Created user");
        Ok(user)
    }

    pub async fn list(&self, page: Page) -> DomainResult<Vec<User>> {
        debug!(offset = page.offset, limit = page.limit, "Listing users");
        self.store.list_users(page).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::User, id))
    }

    /// Deletes the user together with every project and task it owns
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.store.delete_user(id).await? {
            return Err(DomainError::not_found(EntityKind::User, id));
        }

        info!(user_id = id, "Deleted user and owned projects/tasks");
        Ok(())
    }
}
