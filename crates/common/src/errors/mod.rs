//! Error types for CiteShelf
//!
//! Every failure maps to an HTTP status and a fixed public message.
//! The underlying cause is logged server-side and never leaves the process;
//! clients only ever see `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("Required field missing: {field}")]
    MissingParameter { field: String },

    #[error("Invalid publication payload: {reason}")]
    InvalidPublication { reason: String },

    #[error("Invalid publication id: {id}")]
    InvalidId { id: String },

    // Store errors
    #[error("Failed to read publications: {0}")]
    StoreRead(#[source] sea_orm::DbErr),

    #[error("Failed to write publication: {0}")]
    StoreWrite(#[source] sea_orm::DbErr),

    #[error("Failed to write imported publication: {0}")]
    ImportWrite(#[source] sea_orm::DbErr),

    #[error("Failed to delete publication: {0}")]
    StoreDelete(#[source] sea_orm::DbErr),

    #[error("Failed to create publications table: {0}")]
    StoreSchema(#[source] sea_orm::DbErr),

    #[error("Database connection error: {message}")]
    DatabaseConnection { message: String },
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::MissingParameter { .. } |
            AppError::InvalidPublication { .. } |
            AppError::InvalidId { .. } |
            AppError::StoreWrite(_) |
            AppError::ImportWrite(_) |
            AppError::StoreDelete(_) => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            AppError::StoreRead(_) |
            AppError::StoreSchema(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 503 Service Unavailable
            AppError::DatabaseConnection { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Message returned to the client
    pub fn public_message(&self) -> String {
        match self {
            AppError::MissingParameter { field } if field == "doi" => "DOI required".to_string(),
            AppError::MissingParameter { field } => format!("{} required", field),
            AppError::InvalidPublication { .. } |
            AppError::StoreWrite(_) => "Failed to add publication".to_string(),
            AppError::ImportWrite(_) => "Failed to import publication".to_string(),
            AppError::InvalidId { .. } |
            AppError::StoreDelete(_) => "Failed to delete".to_string(),
            AppError::StoreRead(_) => "Failed to fetch publications".to_string(),
            AppError::StoreSchema(_) => "Internal server error".to_string(),
            AppError::DatabaseConnection { .. } => "Database unavailable".to_string(),
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Flat error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let cause = self.to_string();

        // Log based on severity
        if self.is_server_error() {
            tracing::error!(
                error = %cause,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %cause,
                status = status.as_u16(),
                "Client error"
            );
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_missing_doi_message() {
        let err = AppError::MissingParameter { field: "doi".into() };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "DOI required");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_store_write_hides_cause() {
        let err = AppError::StoreWrite(DbErr::Custom("disk full".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Failed to add publication");
        assert!(!err.public_message().contains("disk full"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_delete_errors_share_message() {
        let invalid = AppError::InvalidId { id: "nope".into() };
        let store = AppError::StoreDelete(DbErr::Custom("gone".into()));
        assert_eq!(invalid.public_message(), "Failed to delete");
        assert_eq!(store.public_message(), "Failed to delete");
        assert_eq!(store.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_list_failure_is_server_error() {
        let err = AppError::StoreRead(DbErr::Custom("connection reset".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_server_error());
        assert_eq!(err.public_message(), "Failed to fetch publications");
    }

    #[test]
    fn test_schema_failure_is_server_error() {
        let err = AppError::StoreSchema(DbErr::Custom("permission denied".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().starts_with("Failed to create publications table"));
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::ImportWrite(DbErr::Custom("x".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
