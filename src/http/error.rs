//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::utils::errors::LifelinkError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub struct AppError(pub LifelinkError);

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            LifelinkError::UserNotFound { .. }
            | LifelinkError::RequestNotFound { .. }
            | LifelinkError::DonationNotFound { .. }
            | LifelinkError::DriveNotFound { .. }
            | LifelinkError::RegistrationNotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            LifelinkError::Authentication(_) | LifelinkError::Token(_) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
            }
            LifelinkError::PermissionDenied(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            LifelinkError::RateLimitExceeded => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED")
            }
            LifelinkError::EmailAlreadyRegistered(_) | LifelinkError::AlreadyRegistered { .. } => {
                (StatusCode::CONFLICT, "CONFLICT")
            }
            LifelinkError::InsufficientInventory { .. } => {
                (StatusCode::CONFLICT, "INSUFFICIENT_INVENTORY")
            }
            LifelinkError::InvalidStateTransition { .. } => {
                (StatusCode::CONFLICT, "INVALID_STATE")
            }
            LifelinkError::DonorNotEligible { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "NOT_ELIGIBLE")
            }
            LifelinkError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            LifelinkError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Internal detail stays in the logs, not the response body
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "Internal error while handling request");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ApiError::new(code, message))).into_response()
    }
}

impl From<LifelinkError> for AppError {
    fn from(err: LifelinkError) -> Self {
        AppError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                LifelinkError::UserNotFound { user_id: 1 },
                StatusCode::NOT_FOUND,
            ),
            (
                LifelinkError::Authentication("bad token".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                LifelinkError::PermissionDenied("nope".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (LifelinkError::RateLimitExceeded, StatusCode::TOO_MANY_REQUESTS),
            (
                LifelinkError::EmailAlreadyRegistered("a@b.c".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                LifelinkError::InsufficientInventory {
                    blood_type: "A+".to_string(),
                    requested: 5,
                    available: 1,
                },
                StatusCode::CONFLICT,
            ),
            (
                LifelinkError::DonorNotEligible { days_remaining: 3 },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                LifelinkError::InvalidInput("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                LifelinkError::Config("broken".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let (status, _) = AppError(err).status_and_code();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let response = AppError(LifelinkError::Config("secret dsn".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
