//! HTTP error boundary.
//!
//! Every handler returns `Result<_, ApiError>`. The error decides its own
//! status code and machine-readable code, and renders as
//! `{ "error": { "code", "message", "details"? } }`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::api::dto::ErrorResponse;
use crate::ports::{CommandError, RepositoryError};

// =============================================================================
// ApiError
// =============================================================================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied: {reason}")]
    Forbidden { reason: String },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

// =============================================================================
// Factory Methods
// =============================================================================

impl ApiError {
    #[must_use]
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    #[must_use]
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// =============================================================================
// Query Methods
// =============================================================================

impl ApiError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Command(CommandError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Command(CommandError::Rejected { .. }) => StatusCode::CONFLICT,
            Self::Command(CommandError::Unavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Command(CommandError::Internal { .. }) | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Command(CommandError::NotFound { .. }) => "TASK_NOT_FOUND",
            Self::Command(CommandError::Rejected { .. }) => "COMMAND_REJECTED",
            Self::Command(CommandError::Unavailable { .. }) => "COMMAND_PROCESSOR_UNAVAILABLE",
            Self::Command(CommandError::Internal { .. }) | Self::Internal { .. } => {
                "INTERNAL_ERROR"
            }
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation {
                field: Some(field), ..
            } => Some(json!({ "field": field })),
            Self::Command(CommandError::NotFound { identifier }) => {
                Some(json!({ "identifier": identifier }))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        tracing::error!(error = %error, "Read model query failed");
        Self::internal("Failed to load tasks")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let body = match self.details() {
            Some(details) => ErrorResponse::with_details(self.error_code(), self.to_string(), details),
            None => ErrorResponse::new(self.error_code(), self.to_string()),
        };

        (status_code, Json(body)).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================
