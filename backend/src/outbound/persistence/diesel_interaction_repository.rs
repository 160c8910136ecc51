//! PostgreSQL-backed `InteractionRepository` implementation using Diesel ORM.
//!
//! The composite primary key on `(idea_id, user_id)` keeps one row per
//! pair; writes are `INSERT ... ON CONFLICT DO UPDATE` upserts and clearing
//! is a `DELETE` whose predicate carries the expected status, so the
//! lost-update race between stale tabs resolves in the database.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{InteractionRepository, InteractionRepositoryError};
use crate::domain::{Interaction, InteractionStatus, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{InteractionRow, NewInteractionRow};
use super::pool::{DbPool, PoolError};
use super::schema::interactions;

/// Diesel-backed implementation of the interaction repository port.
#[derive(Clone)]
pub struct DieselInteractionRepository {
    pool: DbPool,
}

impl DieselInteractionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> InteractionRepositoryError {
    map_basic_pool_error(error, |message| {
        InteractionRepositoryError::connection(message)
    })
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> InteractionRepositoryError {
    map_basic_diesel_error(
        error,
        InteractionRepositoryError::query,
        InteractionRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain interaction.
fn row_to_interaction(row: InteractionRow) -> Result<Interaction, InteractionRepositoryError> {
    let InteractionRow {
        idea_id,
        user_id,
        status,
        updated_at,
    } = row;

    let status = InteractionStatus::from_str(status.as_str())
        .map_err(|err| InteractionRepositoryError::query(format!("decode status: {err}")))?;

    Ok(Interaction {
        idea_id,
        user_id: UserId::from_uuid(user_id),
        status,
        updated_at,
    })
}

#[async_trait]
impl InteractionRepository for DieselInteractionRepository {
    async fn find(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
    ) -> Result<Option<Interaction>, InteractionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = interactions::table
            .find((idea_id, user_id.as_uuid()))
            .select(InteractionRow::as_select())
            .first::<InteractionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_interaction).transpose()
    }

    async fn upsert_status(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
        status: InteractionStatus,
    ) -> Result<Interaction, InteractionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewInteractionRow {
            idea_id,
            user_id: *user_id.as_uuid(),
            status: status.as_str(),
            updated_at: Utc::now(),
        };

        let row: InteractionRow = diesel::insert_into(interactions::table)
            .values(&new_row)
            .on_conflict((interactions::idea_id, interactions::user_id))
            .do_update()
            .set(&new_row)
            .returning(InteractionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_interaction(row)
    }

    async fn delete_matching(
        &self,
        idea_id: Uuid,
        user_id: &UserId,
        expected: InteractionStatus,
    ) -> Result<bool, InteractionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Compare-and-delete: the predicate carries the expectation.
        let deleted = diesel::delete(
            interactions::table.filter(
                interactions::idea_id
                    .eq(idea_id)
                    .and(interactions::user_id.eq(user_id.as_uuid()))
                    .and(interactions::status.eq(expected.as_str())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> InteractionRow {
        InteractionRow {
            idea_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            status: "saved".to_owned(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            repo_err,
            InteractionRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, InteractionRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_parses_the_status(valid_row: InteractionRow) {
        let interaction = row_to_interaction(valid_row).expect("valid row");
        assert_eq!(interaction.status, InteractionStatus::Saved);
    }

    #[rstest]
    fn row_conversion_rejects_unknown_status(mut valid_row: InteractionRow) {
        valid_row.status = "liked".to_owned();

        let error = row_to_interaction(valid_row).expect_err("unknown status should fail");
        assert!(matches!(error, InteractionRepositoryError::Query { .. }));
        assert!(error.to_string().contains("decode status"));
    }
}
