//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::infrastructure::user::{ErrorKind, ServiceError};

/// Error body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    pub kind: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: message.into(),
                kind: kind.into(),
            },
        }
    }

    /// Malformed request that never reached the user service
    pub fn invalid_request(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, "invalid_request", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ErrorKind::InvalidCredentials.as_str(),
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::DuplicateKey => StatusCode::CONFLICT,
        ErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::new(status_for(err.kind), err.kind.as_str(), err.message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.response.kind, self.response.error)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_conversion() {
        let cases = [
            (ErrorKind::NotFound, StatusCode::NOT_FOUND, "not_found"),
            (ErrorKind::DuplicateKey, StatusCode::CONFLICT, "duplicate_key"),
            (ErrorKind::InvalidCredentials, StatusCode::UNAUTHORIZED, "invalid_credentials"),
            (ErrorKind::Validation, StatusCode::BAD_REQUEST, "validation"),
            (ErrorKind::StorageUnavailable, StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable"),
            (ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        ];

        for (kind, status, name) in cases {
            let api_err = ApiError::from(ServiceError::new(kind, "boom"));
            assert_eq!(api_err.status, status);
            assert_eq!(api_err.response.kind, name);
            assert_eq!(api_err.response.error, "boom");
        }
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::unauthorized("Invalid login or password");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"], "Invalid login or password");
        assert_eq!(json["kind"], "invalid_credentials");
    }
}
