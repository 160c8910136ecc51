//! Login domain service backed by the user directory.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LoginService, UserRepository, UserRepositoryError};
use crate::domain::{DisplayName, Error, User};

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Login service resolving display names through the user repository.
#[derive(Clone)]
pub struct DirectoryLoginService<R> {
    user_repo: Arc<R>,
}

impl<R> DirectoryLoginService<R> {
    /// Create a new service with the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> LoginService for DirectoryLoginService<R>
where
    R: UserRepository,
{
    async fn login(&self, display_name: DisplayName) -> Result<User, Error> {
        self.user_repo
            .find_or_create(&display_name)
            .await
            .map_err(map_repository_error)
    }
}
