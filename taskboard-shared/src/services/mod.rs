/// Entity services
///
/// Each service composes the [`Store`](crate::store::Store) with the
/// [`validation`](crate::validation) checks and turns "absent" results into
/// `NotFound` errors. Services are cheap to clone: they share the store
/// through an `Arc`.
///
/// - [`UserService`]: create / list / get / delete (cascading)
/// - [`ProjectService`]: create / list / list by user / get with tasks /
///   replace / delete (detaching tasks)
/// - [`TaskService`]: create / filtered list / list by user / get /
///   partial update / delete

pub mod project_service;
pub mod task_service;
pub mod user_service;

pub use project_service::ProjectService;
pub use task_service::TaskService;
pub use user_service::UserService;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::auth::password::{Argon2Hasher, HashingParams};
    use crate::models::User;
    use crate::services::UserService;
    use crate::store::{MemoryStore, Store};
    use std::sync::Arc;

    pub fn memory_store() -> Arc<dyn Store> {
        Arc::new(MemoryStore::new())
    }

    pub fn user_service(store: &Arc<dyn Store>) -> UserService {
        let hasher = Argon2Hasher::new(HashingParams::minimal()).unwrap();
        UserService::new(store.clone(), hasher)
    }

    pub async fn create_user(store: &Arc<dyn Store>, username: &str) -> User {
        user_service(store)
            .create(username, &format!("{}@example.com", username), "password123")
            .await
            .unwrap()
    }
}
