//! Error types for lunchly-db
//!
//! Store failures are wrapped, never retried. The only error this crate
//! raises on its own behalf is `NotFound`.

use axum::http::StatusCode;
use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    /// Anything the underlying query execution reports (connectivity,
    /// constraint violation, malformed SQL).
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("No such {resource}: {id}")]
    NotFound { resource: &'static str, id: String },

    /// A row was missing a field or carried a value of the wrong type.
    #[error("cannot decode field '{field}': expected {expected}")]
    Decode {
        field: String,
        expected: &'static str,
    },

    #[error("unsupported column type {type_name} for column '{column}'")]
    UnsupportedColumn { column: String, type_name: String },

    /// INSERT ... RETURNING came back empty
    #[error("insert into {table} returned no row")]
    MissingReturning { table: &'static str },
}

impl DbError {
    /// Create a not-found error for the given resource and id
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a decode error for a row field
    pub fn decode(field: impl Into<String>, expected: &'static str) -> Self {
        Self::Decode {
            field: field.into(),
            expected,
        }
    }

    /// HTTP-equivalent status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = DbError::not_found("customer", 42);
        assert_eq!(err.to_string(), "No such customer: 42");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.is_not_found());
    }

    #[test]
    fn store_failure_is_500() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::Sqlx(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn decode_display() {
        let err = DbError::decode("firstName", "text");
        assert_eq!(
            err.to_string(),
            "cannot decode field 'firstName': expected text"
        );
    }
}
