//! Mapping from pool and Diesel failures to [`EbookRepositoryError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::EbookRepositoryError;

use super::models::RowDecodeError;
use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> EbookRepositoryError {
    EbookRepositoryError::connection(error.into_message())
}

/// Closed or unreachable connections are reported as connection failures so
/// the HTTP layer can answer 503; everything else is a query failure.
pub(super) fn map_diesel_error(error: DieselError, operation: &str) -> EbookRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        other => debug!(error = %other, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EbookRepositoryError::connection("database connection closed")
        }
        DieselError::BrokenTransactionManager => {
            EbookRepositoryError::connection("database connection unusable")
        }
        DieselError::QueryBuilderError(_) => {
            EbookRepositoryError::query(format!("{operation}: invalid query"))
        }
        _ => EbookRepositoryError::query(format!("{operation}: database error")),
    }
}

pub(super) fn map_decode_error(error: RowDecodeError) -> EbookRepositoryError {
    EbookRepositoryError::query(error.to_string())
}
