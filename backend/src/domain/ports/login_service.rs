//! Driving port for the development login surface.
//!
//! Authentication proper is an external collaborator; the engagement core
//! only needs a trusted user id in the session. This port backs the thin
//! login endpoint that resolves a display name to a user row so claim
//! status can show who is building an idea.

use async_trait::async_trait;

use crate::domain::{DisplayName, Error, User, UserId};

/// Driving port for establishing a user identity from a display name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Resolve a display name to a user, creating the user if absent.
    async fn login(&self, display_name: DisplayName) -> Result<User, Error>;
}

/// In-memory login used until persistence is wired.
///
/// Deterministic: every login with the same display name yields the same
/// fixed user id, so handler tests can assert against it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

/// Fixed id issued by [`FixtureLoginService`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn login(&self, display_name: DisplayName) -> Result<User, Error> {
        let id = UserId::new(FIXTURE_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        Ok(User::new(id, display_name))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_login_issues_the_fixed_id() {
        let service = FixtureLoginService;
        let name = DisplayName::new("Ada Lovelace").expect("valid name");
        let user = service.login(name.clone()).await.expect("login succeeds");
        assert_eq!(user.id().as_ref(), FIXTURE_USER_ID);
        assert_eq!(user.display_name(), &name);
    }
}
