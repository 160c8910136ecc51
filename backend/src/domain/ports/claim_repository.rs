//! Driven port for claim persistence.
//!
//! Every mutating operation here is a single atomic storage operation. The
//! adapter must never implement `try_claim` as a read followed by an insert:
//! exclusivity comes from a storage-level uniqueness guarantee over "one
//! unreleased claim per idea", so concurrent attempts resolve to exactly one
//! winner without any application lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Claim, Progress, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by claim repository adapters.
    pub enum ClaimRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "claim repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "claim repository query failed: {message}",
        /// The idea already has an unreleased claim.
        AlreadyClaimed { idea_id: Uuid } =>
            "idea {idea_id} already has an active claim",
    }
}

/// Port for claim storage with first-writer-wins semantics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClaimRepository: Send + Sync {
    /// Atomically create an active claim for `idea_id` owned by `user_id`.
    ///
    /// Returns [`ClaimRepositoryError::AlreadyClaimed`] when another active
    /// claim exists, decided entirely by the storage engine's uniqueness
    /// guarantee. The call returns immediately in either case.
    async fn try_claim(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
    ) -> Result<Claim, ClaimRepositoryError>;

    /// Read the active claim for an idea, if any.
    async fn find_active(&self, idea_id: Uuid) -> Result<Option<Claim>, ClaimRepositoryError>;

    /// Compare-and-set progress on the caller's active claim.
    ///
    /// The predicate is `idea_id = ? AND user_id = ? AND released_at IS
    /// NULL`; `None` means zero rows matched. Callers disambiguate that
    /// outcome with [`ClaimRepository::find_active`].
    async fn update_progress(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
        progress: Progress,
    ) -> Result<Option<Claim>, ClaimRepositoryError>;

    /// Compare-and-set `released_at` on the caller's active claim.
    ///
    /// Same predicate and `None` semantics as
    /// [`ClaimRepository::update_progress`]. Released rows are retained.
    async fn release(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
        released_at: DateTime<Utc>,
    ) -> Result<Option<Claim>, ClaimRepositoryError>;

    /// Count all claim rows ever recorded for an idea, released included.
    async fn count_claims(&self, idea_id: Uuid) -> Result<i64, ClaimRepositoryError>;
}

/// Fixture implementation for tests that do not exercise claim persistence.
///
/// Behaves like an empty store: every claim attempt wins, nothing is ever
/// found afterwards.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClaimRepository;

#[async_trait]
impl ClaimRepository for FixtureClaimRepository {
    async fn try_claim(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
    ) -> Result<Claim, ClaimRepositoryError> {
        Ok(Claim {
            id: Uuid::new_v4(),
            idea_id,
            user_id: user_id.clone(),
            progress: Progress::ZERO,
            claimed_at: Utc::now(),
            released_at: None,
        })
    }

    async fn find_active(&self, _idea_id: Uuid) -> Result<Option<Claim>, ClaimRepositoryError> {
        Ok(None)
    }

    async fn update_progress(
        &self,
        _idea_id: Uuid,
        _user_id: &UserId,
        _progress: Progress,
    ) -> Result<Option<Claim>, ClaimRepositoryError> {
        Ok(None)
    }

    async fn release(
        &self,
        _idea_id: Uuid,
        _user_id: &UserId,
        _released_at: DateTime<Utc>,
    ) -> Result<Option<Claim>, ClaimRepositoryError> {
        Ok(None)
    }

    async fn count_claims(&self, _idea_id: Uuid) -> Result<i64, ClaimRepositoryError> {
        Ok(0)
    }
}
