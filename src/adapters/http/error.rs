//! Error responses for the REST API.
//!
//! Every handler returns `Result<_, ApiError>`; the domain error category
//! decides the HTTP status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::foundation::{DomainError, ErrorCategory, ValidationError};

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// A domain error on its way out of an HTTP handler.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Conflict => StatusCode::CONFLICT,
            ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let err = self.0;

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(code = %err.code, message = %err.message, "Request failed");
            let body = ErrorResponse::new(err.code.to_string(), "Internal server error");
            return (status, Json(body)).into_response();
        }

        let body = if err.details.is_empty() {
            ErrorResponse::new(err.code.to_string(), err.message)
        } else {
            let details = serde_json::to_value(&err.details).unwrap_or(serde_json::Value::Null);
            ErrorResponse::with_details(err.code.to_string(), err.message, details)
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn categories_map_to_statuses() {
        let cases = [
            (ErrorCode::OutOfRange, StatusCode::BAD_REQUEST),
            (ErrorCode::WorkshopPriceNotFound, StatusCode::NOT_FOUND),
            (ErrorCode::RegistrationExists, StatusCode::CONFLICT),
            (ErrorCode::InvalidStateTransition, StatusCode::CONFLICT),
            (ErrorCode::DatabaseError, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, status) in cases {
            assert_eq!(ApiError::from(DomainError::new(code, "x")).status(), status);
        }
    }

    #[test]
    fn error_response_uses_camel_case_and_omits_empty_details() {
        let json = serde_json::to_string(&ErrorResponse::new("SEASON_NOT_FOUND", "Season not found"))
            .unwrap();
        assert!(json.contains("\"errorCode\":\"SEASON_NOT_FOUND\""));
        assert!(!json.contains("details"));
    }

    #[tokio::test]
    async fn internal_errors_hide_the_cause() {
        let response =
            ApiError::from(DomainError::database("insert payment", "connection reset")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error_code, "DATABASE_ERROR");
        assert!(!body.message.contains("connection reset"));
    }

    #[tokio::test]
    async fn validation_details_are_exposed() {
        let response = ApiError::from(ValidationError::empty_field("label")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error_code, "EMPTY_FIELD");
        assert_eq!(body.details, Some(serde_json::json!({"field": "label"})));
    }
}
