//! HTTP error mapping

use crate::error::{AnalysisError, ErrorClass};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error body returned to clients
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// An HTTP status with a client-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    /// Create an error with the given status
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<AnalysisError> for ApiError {
    /// Client errors keep their message; internal details are not leaked
    fn from(err: AnalysisError) -> Self {
        match err.class() {
            ErrorClass::Client => ApiError::new(StatusCode::BAD_REQUEST, err.to_string()),
            ErrorClass::Retryable => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Analysis timed out; please retry",
            ),
            ErrorClass::Recoverable | ErrorClass::Internal => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Analysis failed due to an internal error",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_keeps_message() {
        let api: ApiError = AnalysisError::invalid("zip must be a 5-digit ZIP code").into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert!(api.detail.contains("5-digit"));
    }

    #[test]
    fn test_internal_error_is_generic() {
        let api: ApiError = AnalysisError::DegenerateSimulation { paths: 0, steps: 60 }.into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.detail.contains("paths"));
    }

    #[test]
    fn test_timeout_is_retryable() {
        let api: ApiError = AnalysisError::SimulationTimeout { elapsed_ms: 5000 }.into();
        assert_eq!(api.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
