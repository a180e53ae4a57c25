//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion and process exit codes
//! for CLI commands.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::{EXIT_CODE_FAILURE, EXIT_CODE_SPAWN_FAILURE, MSG_NOT_FOUND};

/// Per-field validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Not found.")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid fields: {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
    Fields(FieldErrors),

    #[error("{0}")]
    Unprocessable(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Bootstrap pipeline
    #[error("`{command}` exited with status {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("`{command}` could not be started: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
    code: &'static str,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "not_found",
            AppError::Validation(_) | AppError::Fields(_) => "invalid",
            AppError::Unprocessable(_) => "unprocessable",
            AppError::Database(_) => "database_error",
            AppError::CommandFailed { .. } | AppError::CommandSpawn { .. } => "command_failed",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::Fields(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_)
            | AppError::CommandFailed { .. }
            | AppError::CommandSpawn { .. }
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::NotFound => MSG_NOT_FOUND.to_string(),
            AppError::Validation(msg) | AppError::Unprocessable(msg) => msg.clone(),

            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// Process exit code for CLI commands.
    ///
    /// A failed external command propagates its own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::CommandFailed { code, .. } => *code,
            AppError::CommandSpawn { .. } => EXIT_CODE_SPAWN_FAILURE,
            _ => EXIT_CODE_FAILURE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::Fields(fields) = self {
            return (status, Json(fields)).into_response();
        }

        let body = ErrorResponse {
            detail: self.user_message(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        AppError::Unprocessable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Single-field validation failure
    pub fn field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.into(), vec![msg.into()]);
        AppError::Fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failure_propagates_exit_code() {
        let err = AppError::CommandFailed {
            command: "cargo test".to_string(),
            code: 101,
        };
        assert_eq!(err.exit_code(), 101);
        assert_eq!(err.to_string(), "`cargo test` exited with status 101");
    }

    #[test]
    fn test_spawn_failure_exit_code() {
        let err = AppError::CommandSpawn {
            command: "missing-tool".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.exit_code(), EXIT_CODE_SPAWN_FAILURE);
        assert_eq!(AppError::NotFound.exit_code(), EXIT_CODE_FAILURE);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::unprocessable("x").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::field("name", "x").status(), StatusCode::BAD_REQUEST);
    }
}
