use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User};

/// Repository trait for User persistence
///
/// Absence is reported as `None`/`false`, never as an error. The `Err` arm is
/// reserved for storage failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Exact-match lookup by id
    async fn find_by_id(&self, id: &str) -> UserResult<Option<User>>;

    /// Build a new user from the input and store it
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// Merge the provided fields onto an existing user
    async fn update(&self, id: &str, input: UpdateUser) -> UserResult<Option<User>>;

    /// Remove a user; `true` if one was removed
    async fn delete(&self, id: &str) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository
///
/// Clones share the same map. Every operation holds the lock for its whole
/// duration, so readers never see a partially applied update.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        // UUIDv7 ids are monotonic within the process, so this is creation order
        result.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(result)
    }

    async fn find_by_id(&self, id: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        let user = User::from(input);
        users.insert(user.id.clone(), user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn update(&self, id: &str, input: UpdateUser) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(user) = users.get_mut(id) else {
            return Ok(None);
        };

        user.apply_update(input);
        let updated = user.clone();

        tracing::info!(user_id = %id, "Updated user");
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> CreateUser {
        CreateUser {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_all_on_empty_store() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let repo = InMemoryUserRepository::new();

        let user = repo.create(john()).await.unwrap();
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "john@example.com");

        let fetched = repo.find_by_id(&user.id).await.unwrap();
        assert_eq!(fetched, Some(user));
    }

    #[tokio::test]
    async fn test_identical_input_yields_distinct_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(john()).await.unwrap();
        let second = repo.create(john()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_all_returns_creation_order() {
        let repo = InMemoryUserRepository::new();

        let mut created = Vec::new();
        for i in 0..5 {
            let input = CreateUser {
                name: format!("user-{}", i),
                email: format!("user{}@example.com", i),
            };
            created.push(repo.create(input).await.unwrap().id);
        }

        let listed: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(listed, created);
    }

    #[tokio::test]
    async fn test_find_by_unknown_id_is_none() {
        let repo = InMemoryUserRepository::new();
        assert_eq!(repo.find_by_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_merges_only_provided_fields() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(john()).await.unwrap();

        let updated = repo
            .update(
                &user.id,
                UpdateUser {
                    name: Some("X".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "X");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.id, user.id);
        assert_eq!(updated.created_at, user.created_at);
        assert_eq!(repo.find_by_id(&user.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let repo = InMemoryUserRepository::new();

        let result = repo.update("missing", UpdateUser::default()).await.unwrap();

        assert_eq!(result, None);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_find_is_none() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(john()).await.unwrap();

        assert!(repo.delete(&user.id).await.unwrap());
        assert_eq!(repo.find_by_id(&user.id).await.unwrap(), None);
        assert!(!repo.delete(&user.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_mutates_nothing() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(john()).await.unwrap();

        assert!(!repo.delete("missing").await.unwrap());
        assert_eq!(repo.find_all().await.unwrap(), vec![user]);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryUserRepository::new();
        let other = repo.clone();

        let user = repo.create(john()).await.unwrap();

        assert_eq!(other.find_by_id(&user.id).await.unwrap(), Some(user));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_all_stored() {
        let repo = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(CreateUser {
                        name: format!("user-{}", i),
                        email: format!("user{}@example.com", i),
                    })
                    .await
                    .unwrap()
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.find_all().await.unwrap().len(), 50);
    }
}
