//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion. Storage failures enter
//! through [`classify`], the single translation point to domain outcomes.

mod classifier;

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::ResourceKind;
use crate::infra::StorageError;

pub use classifier::{classify, Outcome};

/// Field name -> validation message
pub type FieldErrors = BTreeMap<String, String>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Validation
    #[error("Request validation failed")]
    Validation(FieldErrors),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Resource errors
    #[error("{kind} with {key} doesn't exist")]
    NotFound { kind: ResourceKind, key: String },

    #[error("{0} is not implemented")]
    Unimplemented(String),

    // Storage failures, already classified
    #[error("Storage failure ({})", .outcome.code())]
    Storage {
        outcome: Outcome,
        #[source]
        source: StorageError,
    },

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl From<StorageError> for AppError {
    fn from(source: StorageError) -> Self {
        AppError::Storage {
            outcome: classify(&source),
            source,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<FieldErrors>,
}

impl AppError {
    /// Domain outcome of this error; `None` for authentication failures.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            AppError::Unauthorized | AppError::Forbidden | AppError::Jwt(_) => None,
            AppError::Validation(fields) => Some(Outcome::ValidationFailed(fields.clone())),
            AppError::BadRequest(_) => Some(Outcome::ValidationFailed(FieldErrors::new())),
            AppError::NotFound { .. } => Some(Outcome::NotFound),
            AppError::Unimplemented(_) => Some(Outcome::Unimplemented),
            AppError::Storage { outcome, .. } => Some(outcome.clone()),
            AppError::Internal(_) => Some(Outcome::Internal),
        }
    }

    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            other => other.outcome().map_or("INTERNAL_ERROR", |o| o.code()),
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            other => other
                .outcome()
                .map_or(StatusCode::INTERNAL_SERVER_ERROR, |o| o.status()),
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound { .. } => self.to_string(),

            // Hide details for internal/security errors
            AppError::Jwt(e) => {
                tracing::warn!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Storage { outcome, source } => {
                if *outcome == Outcome::Internal {
                    tracing::error!("Storage error: {:?}", source);
                } else {
                    tracing::debug!("Storage error classified as {:?}: {}", outcome, source);
                }
                outcome.message().to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                Outcome::Internal.message().to_string()
            }

            // Use default message for others
            other => other
                .outcome()
                .map_or_else(|| other.to_string(), |o| o.message().to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            AppError::Validation(fields) => Some(fields.clone()),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, kind: ResourceKind, key: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, kind: ResourceKind, key: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(kind, key))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(kind: ResourceKind, key: impl Into<String>) -> Self {
        AppError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.into(), msg.into());
        AppError::Validation(fields)
    }

    pub fn unimplemented(what: impl Into<String>) -> Self {
        AppError::Unimplemented(what.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
