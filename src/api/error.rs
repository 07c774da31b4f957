//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::FieldViolation;
use crate::service::text_extraction::ExtractionError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
    /// Every failing request field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Malformed body, unknown field or wrong type (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Well-formed body that breaks field rules (422)
    #[error("Request validation failed: {} invalid field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// Body or upload over the configured limit (413)
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Uploaded document could not be turned into text (400)
    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Validation(_) => "validation_error",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::Extraction(_) => "extraction_failed",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Extraction(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();

        if status.is_server_error() {
            tracing::error!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "API error"
            );
        } else {
            tracing::warn!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "Request rejected"
            );
        }

        let details = match self {
            ApiError::Validation(violations) => Some(violations.clone()),
            _ => None,
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
            details,
        })
    }
}

/// Route JSON extractor failures through `ApiError`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let api_error = match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            ApiError::PayloadTooLarge(err.to_string())
        }
        other => ApiError::BadRequest(other.to_string()),
    };
    api_error.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_validation_error_lists_fields() {
        let err = ApiError::Validation(vec![
            FieldViolation::new("constraints", "at least one constraint is required"),
            FieldViolation::new("local_conditions", "must be at least 30 characters"),
        ]);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["details"][0]["field"], "constraints");
        assert_eq!(json["details"].as_array().unwrap().len(), 2);
        assert!(Uuid::parse_str(json["request_id"].as_str().unwrap()).is_ok());
    }

    #[actix_web::test]
    async fn test_extraction_error_message_is_passed_through() {
        let err = ApiError::from(ExtractionError::Empty);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Uploaded file is empty");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PayloadTooLarge("x".into()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
