//! Driven port for user directory lookups.
//!
//! The engagement core consumes identity; it does not manage it. This port
//! covers the two touch points it needs: resolving a claimer's display name
//! for public claim status, and the find-or-create used by the development
//! login surface.

use async_trait::async_trait;

use crate::domain::{DisplayName, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
    }
}

/// Port for reading and provisioning platform users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Find a user by display name, creating the row if absent.
    ///
    /// Must be a single atomic upsert keyed on the display name so two
    /// concurrent logins with the same name resolve to the same row.
    async fn find_or_create(
        &self,
        display_name: &DisplayName,
    ) -> Result<User, UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, _user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_or_create(
        &self,
        display_name: &DisplayName,
    ) -> Result<User, UserRepositoryError> {
        Ok(User::new(UserId::random(), display_name.clone()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_lookup_returns_none() {
        let repo = FixtureUserRepository;
        let found = repo.find_by_id(&UserId::random()).await.expect("lookup");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_find_or_create_echoes_the_name() {
        let repo = FixtureUserRepository;
        let name = DisplayName::new("Ada Lovelace").expect("valid name");
        let user = repo.find_or_create(&name).await.expect("create");
        assert_eq!(user.display_name(), &name);
    }
}
