//! Shared Diesel error classification for the worklog repositories.
//!
//! Each repository turns a [`DieselFailure`] into its own port error; this
//! module only decides which bucket a Diesel error belongs in and logs the
//! raw database message at debug level so it never reaches clients.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse classification of a Diesel failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// A unique index rejected the write.
    UniqueViolation,
    /// Anything else: constraint, syntax or decoding failure.
    Query(&'static str),
}

/// Message carried by a pool failure; always a connection-class problem.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify `error`, logging the underlying database detail.
pub(crate) fn classify_diesel_error(error: DieselError) -> DieselFailure {
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
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            DieselFailure::Query("referenced user does not exist")
        }
        _ => DieselFailure::Query("database error"),
    }
}
