//! Driven port for interaction status persistence.
//!
//! The store holds at most one row per `(idea, user)` pair. Writes are
//! upserts; removal is a compare-and-delete whose precondition carries the
//! status the caller believes is stored.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Interaction, InteractionStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by interaction repository adapters.
    pub enum InteractionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "interaction repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "interaction repository query failed: {message}",
    }
}

/// Port for the single-status-per-pair interaction store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Read the stored interaction for a pair, if any.
    async fn find(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
    ) -> Result<Option<Interaction>, InteractionRepositoryError>;

    /// Insert or overwrite the stored status for a pair.
    ///
    /// Must be a single atomic upsert so concurrent writers converge on one
    /// row; last writer wins.
    async fn upsert_status(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
        status: InteractionStatus,
    ) -> Result<Interaction, InteractionRepositoryError>;

    /// Delete the stored row only if its status equals `expected`.
    ///
    /// Returns `true` when a row was deleted. A `false` result means the
    /// precondition failed — either no row exists or the stored status
    /// differs; callers disambiguate with [`InteractionRepository::find`].
    async fn delete_matching(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
        expected: InteractionStatus,
    ) -> Result<bool, InteractionRepositoryError>;
}

/// Fixture implementation for tests that do not exercise interactions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInteractionRepository;

#[async_trait]
impl InteractionRepository for FixtureInteractionRepository {
    async fn find(
        &self,
        _idea_id: Uuid,
        _user_id: &UserId,
    ) -> Result<Option<Interaction>, InteractionRepositoryError> {
        Ok(None)
    }

    async fn upsert_status(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
        status: InteractionStatus,
    ) -> Result<Interaction, InteractionRepositoryError> {
        Ok(Interaction {
            idea_id,
            user_id: user_id.clone(),
            status,
            updated_at: Utc::now(),
        })
    }

    async fn delete_matching(
        &self,
        _idea_id: Uuid,
        _user_id: &UserId,
        _expected: InteractionStatus,
    ) -> Result<bool, InteractionRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_upsert_echoes_the_status() {
        let repo = FixtureInteractionRepository;
        let user = UserId::random();
        let idea = Uuid::new_v4();

        let interaction = repo
            .upsert_status(idea, &user, InteractionStatus::Saved)
            .await
            .expect("fixture upsert");
        assert_eq!(interaction.status, InteractionStatus::Saved);
        assert_eq!(interaction.idea_id, idea);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_delete_reports_no_match() {
        let repo = FixtureInteractionRepository;
        let deleted = repo
            .delete_matching(Uuid::new_v4(), &UserId::random(), InteractionStatus::Saved)
            .await
            .expect("fixture delete");
        assert!(!deleted);
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = InteractionRepositoryError::query("broken sql");
        assert!(err.to_string().contains("broken sql"));
    }
}
