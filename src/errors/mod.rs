//! Unified error handling with consistent API response envelope.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Outcome marker carried by every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Consistent JSON envelope for all API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(message: &str, data: T) -> Json<Self> {
        Json(Self {
            status: ResponseStatus::Success,
            message: message.to_string(),
            data: Some(data),
            error: None,
        })
    }
}

impl ApiResponse<()> {
    /// Wrap an error in the envelope.
    pub fn error(message: &str, error: Option<String>) -> Json<Self> {
        Json(Self {
            status: ResponseStatus::Error,
            message: message.to_string(),
            data: None,
            error,
        })
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{message}: {source}")]
    Retrieval {
        message: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Attach the endpoint's retrieval message to a database failure.
    ///
    /// Other variants pass through untouched.
    pub fn retrieving(self, message: &'static str) -> Self {
        match self {
            AppError::Database(source) => AppError::Retrieval { message, source },
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Database(_) | AppError::Retrieval { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Query strings serde cannot deserialize (duplicate keys, for one) get the
/// same 400 envelope as values that fail validation.
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, error) = match &self {
            AppError::Validation(msg) => ("Invalid request parameters", Some(msg.clone())),
            AppError::Unauthorized => ("Authentication required", None),
            AppError::Forbidden(msg) => ("Access denied", Some(msg.clone())),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                ("Error retrieving data", Some(e.to_string()))
            }
            AppError::Retrieval { message, source } => {
                tracing::error!(error = %source, "{message}");
                (*message, Some(source.to_string()))
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ("An internal error occurred", Some(msg.clone()))
            }
        };

        (status, ApiResponse::error(message, error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_response_success() {
        let response = ApiResponse::success("Counts retrieved", 42);
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Counts retrieved");
        assert_eq!(json["data"], 42);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn api_response_error() {
        let response = ApiResponse::error("Error retrieving statistics", Some("boom".into()));
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn retrieving_wraps_database_errors_only() {
        let err = AppError::Database(sqlx::Error::RowNotFound).retrieving("Error retrieving ads");
        assert!(matches!(
            err,
            AppError::Retrieval {
                message: "Error retrieving ads",
                ..
            }
        ));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::Unauthorized.retrieving("Error retrieving ads");
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn app_error_status_codes() {
        assert_eq!(
            AppError::Validation("page".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Forbidden("admin".into()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn app_error_display() {
        let err = AppError::Validation("limit must be a positive integer".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: limit must be a positive integer"
        );
    }

    #[test]
    fn app_error_from_sqlx() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Database(_)));
    }
}
