//! Shared Diesel error mapping for repositories with basic query semantics.
//!
//! Repository-specific outcomes (unique violations, zero rows affected) are
//! handled at each call site; everything else funnels through these helpers
//! so the query/connection split stays consistent across adapters.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
pub fn map_basic_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped: Mapped = map_basic_pool_error(PoolError::checkout("refused"), |message| {
            assert_eq!(message, "refused");
            Mapped::Connection("refused")
        });
        assert_eq!(mapped, Mapped::Connection("refused"));
    }

    #[rstest]
    fn not_found_maps_to_query() {
        let mapped: Mapped =
            map_basic_diesel_error(diesel::result::Error::NotFound, Mapped::Query, |m| {
                Mapped::Connection(m)
            });
        assert_eq!(mapped, Mapped::Query("record not found"));
    }
}
