//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Errors are rendered as a JSON
//! body:
//!
//! ```json
//! {
//!   "title": "Bad Request! Consult the documentation",
//!   "timestamp": "2026-01-15T12:00:00Z",
//!   "status": 400,
//!   "exception": "BusinessError",
//!   "details": ["Invalid Date"]
//! }
//! ```
//!
//! Server-side failures are logged and captured to Sentry; their details are
//! not sent to the client.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::services::{BusinessRule, ServiceError};

const TITLE_BAD_REQUEST: &str = "Bad Request! Consult the documentation";
const TITLE_NOT_FOUND: &str = "Not Found!";
const TITLE_CONFLICT: &str = "Conflict! Consult the documentation";
const TITLE_INTERNAL: &str = "Internal Server Error";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body, path or query failed validation.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A service operation failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl AppError {
    /// Validation error with a single message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Service(err) => match err {
                ServiceError::Business(BusinessRule::InvalidInstallmentDate)
                | ServiceError::Ownership => StatusCode::BAD_REQUEST,
                ServiceError::Business(BusinessRule::UnknownCreditCode(_))
                | ServiceError::CustomerNotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::Repository(_) | ServiceError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Tag reported in the `exception` field.
    fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Service(err) => match err {
                ServiceError::Business(_) => "BusinessError",
                ServiceError::CustomerNotFound(_) => "NotFoundError",
                ServiceError::Conflict(_) => "ConflictError",
                ServiceError::Ownership => "OwnershipError",
                ServiceError::Repository(_) | ServiceError::PasswordHash => "InternalError",
            },
        }
    }

    fn details(&self) -> Vec<String> {
        match self {
            Self::Validation(messages) => messages.clone(),
            Self::Service(ServiceError::Repository(_) | ServiceError::PasswordHash) => Vec::new(),
            Self::Service(err) => vec![err.to_string()],
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub title: &'static str,
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub exception: &'static str,
    pub details: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let title = match status {
            StatusCode::NOT_FOUND => TITLE_NOT_FOUND,
            StatusCode::CONFLICT => TITLE_CONFLICT,
            s if s.is_server_error() => TITLE_INTERNAL,
            _ => TITLE_BAD_REQUEST,
        };

        let body = ErrorBody {
            title,
            timestamp: Utc::now(),
            status: status.as_u16(),
            exception: self.kind(),
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
