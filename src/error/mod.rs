// Error types for promconf
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// A submitted form field failed validation. The whole update was rejected.
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Failed to persist settings: {0}")]
    Persistence(#[source] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SettingsError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending form field, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            SettingsError::Validation { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}

// Convert SettingsError to HTTP responses for Axum
impl IntoResponse for SettingsError {
    fn into_response(self) -> Response {
        let (status, error_type) = match self {
            SettingsError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            SettingsError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_error"),
            SettingsError::Persistence(_) => (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error"),
            SettingsError::Config(_) | SettingsError::ConfigParsing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
            }
            SettingsError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "api_error"),
        };

        let body = json!({
            "type": "error",
            "error": {
                "type": error_type,
                "field": self.field(),
                "message": self.to_string(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;
