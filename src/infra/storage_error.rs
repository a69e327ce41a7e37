//! Structured storage failures.
//!
//! Every repository call surfaces failures as a [`StorageError`], a tagged
//! union that keeps the parts of the driver's cause chain the rest of the
//! application cares about. Translation into domain outcomes happens in
//! [`crate::errors::classify`] and nowhere else.

use sea_orm::{DbErr, RuntimeErr};
use thiserror::Error;

/// Result type alias for repository operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Target row was changed or removed by another writer.
    #[error("stale object state: {0}")]
    StaleObject(String),

    /// Operation is not supported by the storage backend.
    #[error("not implemented by storage: {0}")]
    NotImplemented(String),

    /// Integrity constraint rejected the write.
    #[error(transparent)]
    ConstraintViolation(#[from] ConstraintViolation),

    /// Anything else the driver reported (connectivity, syntax, decoding).
    #[error("storage backend failure")]
    Backend(#[source] DbErr),
}

/// Generic constraint violation, optionally wrapping the database-native one.
#[derive(Debug, Error)]
#[error("constraint violation{}", .constraint.as_deref().map(|c| format!(" on {}", c)).unwrap_or_default())]
pub struct ConstraintViolation {
    pub constraint: Option<String>,
    #[source]
    pub native: Option<NativeViolation>,
}

/// Violation as reported by the database itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("[{code}] {message}")]
pub struct NativeViolation {
    /// Machine-checkable code (SQLSTATE on PostgreSQL, extended result code on SQLite)
    pub code: String,
    pub message: String,
}

impl ConstraintViolation {
    /// Violation carrying a native database code.
    pub fn native(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            constraint: None,
            native: Some(NativeViolation {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

impl StorageError {
    pub fn stale(what: impl Into<String>) -> Self {
        StorageError::StaleObject(what.into())
    }
}

impl From<DbErr> for StorageError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotUpdated => StorageError::stale("record was not updated"),
            DbErr::Exec(runtime) | DbErr::Query(runtime) => match constraint_violation(runtime) {
                Some(violation) => StorageError::ConstraintViolation(violation),
                None => StorageError::Backend(err),
            },
            _ => StorageError::Backend(err),
        }
    }
}

/// Extract an integrity-constraint failure from a driver error, if it is one.
fn constraint_violation(runtime: &RuntimeErr) -> Option<ConstraintViolation> {
    let RuntimeErr::SqlxError(sqlx_err) = runtime else {
        return None;
    };
    let db_err = sqlx_err.as_database_error()?;
    let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();

    let is_integrity = code.starts_with("23")
        || db_err.is_unique_violation()
        || db_err.is_foreign_key_violation()
        || db_err.is_check_violation();
    if !is_integrity {
        return None;
    }

    Some(ConstraintViolation {
        constraint: db_err.constraint().map(str::to_owned),
        native: Some(NativeViolation {
            code,
            message: db_err.message().to_owned(),
        }),
    })
}
