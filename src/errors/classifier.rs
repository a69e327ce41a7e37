//! Failure classifier - maps storage failures to domain outcomes.
//!
//! Pure and total: every [`StorageError`] yields exactly one [`Outcome`],
//! defaulting to [`Outcome::Internal`]. It never retries and never logs.

use std::collections::BTreeMap;

use axum::http::StatusCode;

use crate::infra::{ConstraintViolation, StorageError};

/// Native codes reported for unique / primary key violations.
/// PostgreSQL SQLSTATE first, then SQLite extended result codes.
const UNIQUE_VIOLATION_CODES: &[&str] = &["23505", "2067", "1555"];

/// Native codes reported for foreign key violations.
const FOREIGN_KEY_VIOLATION_CODES: &[&str] = &["23503", "787"];

/// Domain-level result of a failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Request fields rejected (field name -> message)
    ValidationFailed(BTreeMap<String, String>),
    /// Requested or referenced aggregate absent
    NotFound,
    /// Uniqueness violated on write
    DuplicateResource,
    /// Row still referenced elsewhere
    DependencyConflict,
    /// Target mutated or removed concurrently
    StaleWrite,
    /// Explicitly unsupported operation
    Unimplemented,
    /// Anything unrecognized
    Internal,
}

/// Classify a storage failure.
pub fn classify(error: &StorageError) -> Outcome {
    match error {
        StorageError::StaleObject(_) => Outcome::StaleWrite,
        StorageError::NotImplemented(_) => Outcome::Unimplemented,
        StorageError::ConstraintViolation(violation) => classify_violation(violation),
        StorageError::Backend(_) => Outcome::Internal,
    }
}

fn classify_violation(violation: &ConstraintViolation) -> Outcome {
    let Some(native) = &violation.native else {
        return Outcome::Internal;
    };
    let code = native.code.as_str();

    if UNIQUE_VIOLATION_CODES.contains(&code) {
        Outcome::DuplicateResource
    } else if FOREIGN_KEY_VIOLATION_CODES.contains(&code) {
        Outcome::DependencyConflict
    } else {
        Outcome::Internal
    }
}

impl Outcome {
    /// HTTP status the boundary layer renders for this outcome.
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            // A stale target no longer exists in the expected state
            Outcome::NotFound | Outcome::StaleWrite => StatusCode::NOT_FOUND,
            Outcome::DuplicateResource | Outcome::DependencyConflict => StatusCode::CONFLICT,
            Outcome::Unimplemented => StatusCode::NOT_IMPLEMENTED,
            Outcome::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            Outcome::ValidationFailed(_) => "VALIDATION_ERROR",
            Outcome::NotFound => "NOT_FOUND",
            Outcome::DuplicateResource => "DUPLICATE_RESOURCE",
            Outcome::DependencyConflict => "DEPENDENCY_CONFLICT",
            Outcome::StaleWrite => "STALE_WRITE",
            Outcome::Unimplemented => "NOT_IMPLEMENTED",
            Outcome::Internal => "INTERNAL_ERROR",
        }
    }

    /// User-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::ValidationFailed(_) => "Request Validation Error",
            Outcome::NotFound | Outcome::StaleWrite => "No Resource Found",
            Outcome::DuplicateResource => "Resource Already Exists",
            Outcome::DependencyConflict => "Resource Cannot Be Deleted Due To Dependencies",
            Outcome::Unimplemented => "Not Implemented",
            Outcome::Internal => "Internal Server Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    fn violation(code: &str) -> StorageError {
        StorageError::from(ConstraintViolation::native(code, "violation"))
    }

    #[test]
    fn test_unique_violation_is_duplicate() {
        assert_eq!(classify(&violation("23505")), Outcome::DuplicateResource);
        assert_eq!(classify(&violation("2067")), Outcome::DuplicateResource);
    }

    #[test]
    fn test_foreign_key_violation_is_dependency_conflict() {
        assert_eq!(classify(&violation("23503")), Outcome::DependencyConflict);
        assert_eq!(classify(&violation("787")), Outcome::DependencyConflict);
    }

    #[test]
    fn test_unknown_native_code_is_internal() {
        // not-null violation
        assert_eq!(classify(&violation("23502")), Outcome::Internal);
    }

    #[test]
    fn test_violation_without_native_cause_is_internal() {
        let err = StorageError::from(ConstraintViolation {
            constraint: Some("uq_categories_name".into()),
            native: None,
        });
        assert_eq!(classify(&err), Outcome::Internal);
    }

    #[test]
    fn test_stale_object_is_stale_write() {
        assert_eq!(classify(&StorageError::stale("cars")), Outcome::StaleWrite);
        assert_eq!(
            classify(&StorageError::from(DbErr::RecordNotUpdated)),
            Outcome::StaleWrite
        );
    }

    #[test]
    fn test_not_implemented_marker() {
        let err = StorageError::NotImplemented("bulk delete".into());
        assert_eq!(classify(&err), Outcome::Unimplemented);
    }

    #[test]
    fn test_unrecognized_error_is_internal() {
        let err = StorageError::from(DbErr::Custom("connection reset".into()));
        assert_eq!(classify(&err), Outcome::Internal);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(Outcome::ValidationFailed(BTreeMap::new()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(Outcome::StaleWrite.status(), StatusCode::NOT_FOUND);
        assert_eq!(Outcome::DependencyConflict.status(), StatusCode::CONFLICT);
        assert_eq!(Outcome::Unimplemented.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(Outcome::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
