// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type.
///
/// `Fetch` is the only failure a view turns into a notification. Its
/// `Display` output is the fixed user-facing message of the operation;
/// the HTTP status and body are kept in `detail` for logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Fetch {
        message: &'static str,
        detail: String,
    },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid draft: {0}")]
    Invalid(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Build a fetch failure with its fixed message.
    pub fn fetch(message: &'static str, detail: impl Into<String>) -> Self {
        AppError::Fetch {
            message,
            detail: detail.into(),
        }
    }

    /// Whether this is a network/status failure (as opposed to a bug or bad input).
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, AppError::Fetch { .. })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort_unstable();
        AppError::Invalid(format!("missing or invalid fields: {}", fields.join(", ")))
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Fetch { message, detail } => {
                tracing::warn!(detail = %detail, "Upstream fetch failed");
                (StatusCode::BAD_GATEWAY, "fetch_error", Some(message.to_string()))
            }
            AppError::Decode(msg) => (StatusCode::BAD_GATEWAY, "decode_error", Some(msg.clone())),
            AppError::Invalid(msg) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
