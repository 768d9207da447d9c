//! Unified API error handling
//!
//! This module provides a consistent error response format across all API
//! endpoints.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use uuid::Uuid;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent
/// error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Assessment not found (404)
    #[error("Assessment not found: {0}")]
    AssessmentNotFound(String),

    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Analysis service misconfiguration (502)
    #[error("Analysis service unavailable: {0}")]
    AnalysisUnavailable(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::AssessmentNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::AnalysisUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::AssessmentNotFound(_) => "assessment_not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::AnalysisUnavailable(_) => "analysis_unavailable",
            ApiError::Internal(_) => "internal_error",
            ApiError::Database(_) => "database_error",
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<crate::db::DbError> for ApiError {
    fn from(err: crate::db::DbError) -> Self {
        match err {
            crate::db::DbError::NotFound(id) => ApiError::NotFound(id),
            _ => ApiError::Database(err.to_string()),
        }
    }
}

impl From<crate::service::analysis::AnalysisError> for ApiError {
    fn from(err: crate::service::analysis::AnalysisError) -> Self {
        ApiError::AnalysisUnavailable(err.to_string())
    }
}

impl From<crate::service::assessment::SubmissionError> for ApiError {
    fn from(err: crate::service::assessment::SubmissionError) -> Self {
        match err {
            crate::service::assessment::SubmissionError::Storage(
                crate::db::DbError::NotFound(id),
            ) => ApiError::NotFound(id),
            crate::service::assessment::SubmissionError::Storage(e) => {
                ApiError::Database(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use crate::service::analysis::AnalysisError;

    #[test]
    fn status_codes_match_error_taxonomy() {
        assert_eq!(
            ApiError::AnalysisUnavailable("no key".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::AssessmentNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn db_not_found_maps_to_404() {
        let err: ApiError = DbError::NotFound("abc".into()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_credential_maps_to_502() {
        let err: ApiError = AnalysisError::NotConfigured.into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
