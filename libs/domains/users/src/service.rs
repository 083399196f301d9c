use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

pub const USER_ID_REQUIRED: &str = "User ID is required";

/// Operations the HTTP layer needs from the users domain.
///
/// Handlers depend on this trait rather than on [`UserService`] so the
/// service can be replaced or mocked without touching routing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserManagement: Send + Sync {
    async fn get_all_users(&self) -> UserResult<Vec<User>>;

    async fn get_user_by_id(&self, id: &str) -> UserResult<Option<User>>;

    async fn create_user(&self, input: CreateUser) -> UserResult<User>;

    async fn update_user(&self, id: &str, input: UpdateUser) -> UserResult<Option<User>>;

    async fn delete_user(&self, id: &str) -> UserResult<bool>;
}

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

#[async_trait]
impl<R: UserRepository> UserManagement for UserService<R> {
    async fn get_all_users(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    async fn get_user_by_id(&self, id: &str) -> UserResult<Option<User>> {
        require_id(id)?;
        self.repository.find_by_id(id).await
    }

    async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        // Validate input
        input.validate()?;

        self.repository.create(input).await
    }

    /// Returns `None` without calling `update` when the user does not exist.
    async fn update_user(&self, id: &str, input: UpdateUser) -> UserResult<Option<User>> {
        require_id(id)?;
        input.validate()?;

        if self.repository.find_by_id(id).await?.is_none() {
            tracing::debug!(user_id = %id, "Update skipped, user not found");
            return Ok(None);
        }

        self.repository.update(id, input).await
    }

    async fn delete_user(&self, id: &str) -> UserResult<bool> {
        require_id(id)?;
        self.repository.delete(id).await
    }
}

fn require_id(id: &str) -> UserResult<()> {
    if id.is_empty() {
        return Err(UserError::InvalidArgument(USER_ID_REQUIRED.to_string()));
    }
    Ok(())
}
