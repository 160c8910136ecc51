//! PostgreSQL-backed `ClaimRepository` implementation using Diesel ORM.
//!
//! Exclusivity lives in the database: the `claims_one_active_per_idea`
//! partial unique index guarantees at most one unreleased row per idea, so
//! `try_claim` is a single `INSERT ... RETURNING` whose unique-violation
//! failure *is* the conflict outcome. Progress updates and releases are
//! single predicate `UPDATE ... RETURNING` statements; a zero-row result is
//! reported as `None` and never retried here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ClaimRepository, ClaimRepositoryError};
use crate::domain::{Claim, Progress, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ClaimRow, NewClaimRow};
use super::pool::{DbPool, PoolError};
use super::schema::claims;

/// Diesel-backed implementation of the claim repository port.
#[derive(Clone)]
pub struct DieselClaimRepository {
    pool: DbPool,
}

impl DieselClaimRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> ClaimRepositoryError {
    map_basic_pool_error(error, |message| ClaimRepositoryError::connection(message))
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ClaimRepositoryError {
    map_basic_diesel_error(
        error,
        ClaimRepositoryError::query,
        ClaimRepositoryError::connection,
    )
}

/// Map insert errors, translating the unique violation into the claim
/// conflict outcome.
fn map_claim_insert_error(error: diesel::result::Error, idea_id: Uuid) -> ClaimRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ClaimRepositoryError::already_claimed(idea_id)
        }
        other => map_diesel_error(other),
    }
}

/// Convert a database row into a validated domain claim.
fn row_to_claim(row: ClaimRow) -> Result<Claim, ClaimRepositoryError> {
    let ClaimRow {
        id,
        idea_id,
        user_id,
        progress,
        claimed_at,
        released_at,
        updated_at: _,
    } = row;

    let progress = Progress::new(progress)
        .map_err(|err| ClaimRepositoryError::query(format!("decode progress: {err}")))?;

    Ok(Claim {
        id,
        idea_id,
        user_id: UserId::from_uuid(user_id),
        progress,
        claimed_at,
        released_at,
    })
}

#[async_trait]
impl ClaimRepository for DieselClaimRepository {
    async fn try_claim(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
    ) -> Result<Claim, ClaimRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = Utc::now();

        let new_row = NewClaimRow {
            id: Uuid::new_v4(),
            idea_id,
            user_id: *user_id.as_uuid(),
            progress: 0,
            claimed_at: now,
            updated_at: now,
        };

        // Single atomic insert; the partial unique index decides the winner.
        let row: ClaimRow = diesel::insert_into(claims::table)
            .values(&new_row)
            .returning(ClaimRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_claim_insert_error(err, idea_id))?;

        row_to_claim(row)
    }

    async fn find_active(&self, idea_id: Uuid) -> Result<Option<Claim>, ClaimRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = claims::table
            .filter(
                claims::idea_id
                    .eq(idea_id)
                    .and(claims::released_at.is_null()),
            )
            .select(ClaimRow::as_select())
            .first::<ClaimRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_claim).transpose()
    }

    async fn update_progress(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
        progress: Progress,
    ) -> Result<Option<Claim>, ClaimRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Compare-and-set: the predicate carries the ownership check.
        let row = diesel::update(
            claims::table.filter(
                claims::idea_id
                    .eq(idea_id)
                    .and(claims::user_id.eq(user_id.as_uuid()))
                    .and(claims::released_at.is_null()),
            ),
        )
        .set((
            claims::progress.eq(progress.value()),
            claims::updated_at.eq(Utc::now()),
        ))
        .returning(ClaimRow::as_returning())
        .get_result::<ClaimRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_claim).transpose()
    }

    async fn release(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
        released_at: DateTime<Utc>,
    ) -> Result<Option<Claim>, ClaimRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            claims::table.filter(
                claims::idea_id
                    .eq(idea_id)
                    .and(claims::user_id.eq(user_id.as_uuid()))
                    .and(claims::released_at.is_null()),
            ),
        )
        .set((
            claims::released_at.eq(Some(released_at)),
            claims::updated_at.eq(released_at),
        ))
        .returning(ClaimRow::as_returning())
        .get_result::<ClaimRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_claim).transpose()
    }

    async fn count_claims(&self, idea_id: Uuid) -> Result<i64, ClaimRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        claims::table
            .filter(claims::idea_id.eq(idea_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use diesel::result::DatabaseErrorKind;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> ClaimRow {
        let claimed_at = Utc::now();
        ClaimRow {
            id: Uuid::new_v4(),
            idea_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            progress: 40,
            claimed_at,
            released_at: None,
            updated_at: claimed_at,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, ClaimRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn unique_violation_maps_to_already_claimed() {
        let idea_id = Uuid::new_v4();
        let diesel_err = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );

        let repo_err = map_claim_insert_error(diesel_err, idea_id);
        assert_eq!(repo_err, ClaimRepositoryError::already_claimed(idea_id));
    }

    #[rstest]
    fn other_insert_errors_map_to_query_error() {
        let repo_err = map_claim_insert_error(diesel::result::Error::NotFound, Uuid::new_v4());
        assert!(matches!(repo_err, ClaimRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_preserves_fields(valid_row: ClaimRow) {
        let expected_user = valid_row.user_id;
        let claim = row_to_claim(valid_row).expect("valid row");

        assert_eq!(claim.progress.value(), 40);
        assert_eq!(*claim.user_id.as_uuid(), expected_user);
        assert!(claim.is_active());
    }

    #[rstest]
    fn row_conversion_rejects_out_of_range_progress(mut valid_row: ClaimRow) {
        valid_row.progress = 250;

        let error = row_to_claim(valid_row).expect_err("invalid progress should fail");
        assert!(matches!(error, ClaimRepositoryError::Query { .. }));
        assert!(error.to_string().contains("decode progress"));
    }
}
