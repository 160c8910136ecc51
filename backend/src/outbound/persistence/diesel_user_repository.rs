//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! `find_or_create` is a single upsert keyed on the unique display name: a
//! no-op `DO UPDATE` makes `RETURNING` yield the existing row, so two
//! concurrent logins with the same name atomically resolve to one user.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{DisplayName, User, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, |message| UserRepositoryError::connection(message))
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let display_name = DisplayName::new(row.display_name)
        .map_err(|err| UserRepositoryError::query(format!("decode display name: {err}")))?;
    Ok(User::new(UserId::from_uuid(row.id), display_name))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .find(user_id.as_uuid())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_or_create(
        &self,
        display_name: &DisplayName,
    ) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: Uuid::new_v4(),
            display_name: display_name.as_ref(),
        };

        // No-op DO UPDATE so RETURNING yields the existing row on conflict.
        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::display_name)
            .do_update()
            .set(users::display_name.eq(excluded(users::display_name)))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(row)
    }
}
