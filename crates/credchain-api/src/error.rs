//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps registry and validation errors to HTTP status codes and returns
//! JSON error bodies with a machine-readable code and a human-readable
//! message. Internal error details are never exposed to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use credchain_core::ValidationError;
use credchain_registry::RegistryError;

/// Structured JSON error response body.
///
/// All error responses use this format for consistency across the API
/// surface.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "FORBIDDEN").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authorization failure — the caller lacks the required role or
    /// ownership (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Conflict with current resource state, e.g. revoking an
    /// already-revoked credential (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned
    /// to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert core validation errors to API errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Convert registry errors to API errors.
///
/// Role and ownership failures become 403 — caller identity is request
/// data here, so there is no 401 "who are you" layer to distinguish from.
impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match &err {
            RegistryError::NotAdmin { .. }
            | RegistryError::NotWhitelisted { .. }
            | RegistryError::NotIssuer { .. } => Self::Forbidden(err.to_string()),
            RegistryError::NotFound(_) => Self::NotFound(err.to_string()),
            RegistryError::AlreadyRevoked(_) => Self::Conflict(err.to_string()),
            RegistryError::IdExhausted { .. } => Self::Internal(err.to_string()),
            RegistryError::Validation(_) => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credchain_core::{AccountAddress, EduId};

    fn addr() -> AccountAddress {
        AccountAddress::new("0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc").unwrap()
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                AppError::Validation("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
            ),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN, "FORBIDDEN"),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            let (s, c) = err.status_and_code();
            assert_eq!(s, status);
            assert_eq!(c, code);
        }
    }

    #[test]
    fn registry_auth_errors_map_to_forbidden() {
        let errs = [
            RegistryError::NotAdmin { caller: addr() },
            RegistryError::NotWhitelisted { issuer: addr() },
            RegistryError::NotIssuer {
                caller: addr(),
                edu_id: EduId::new("CREDCHAIN-3C44-1708105200000-A3K9").unwrap(),
            },
        ];
        for err in errs {
            let app_err = AppError::from(err);
            let (status, _) = app_err.status_and_code();
            assert_eq!(status, StatusCode::FORBIDDEN);
        }
    }

    #[test]
    fn registry_not_found_maps_to_404() {
        let err = RegistryError::NotFound(EduId::new("CREDCHAIN-3C44-1708105200000-A3K9").unwrap());
        let (status, _) = AppError::from(err).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn already_revoked_maps_to_conflict() {
        let err =
            RegistryError::AlreadyRevoked(EduId::new("CREDCHAIN-3C44-1708105200000-A3K9").unwrap());
        let (status, code) = AppError::from(err).status_and_code();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "CONFLICT");
    }

    #[test]
    fn validation_error_maps_to_422() {
        let err = RegistryError::Validation(ValidationError::InvalidAddress("nope".into()));
        let (status, _) = AppError::from(err).status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_forbidden_carries_reason() {
        let (status, body) =
            response_parts(AppError::from(RegistryError::NotWhitelisted { issuer: addr() })).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.error.code, "FORBIDDEN");
        assert!(body.error.message.contains("0x3c44cddd"));
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) = response_parts(AppError::Internal("lock poisoned".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            !body.error.message.contains("lock poisoned"),
            "internal error details must not leak: {}",
            body.error.message
        );
        assert_eq!(body.error.message, "An internal error occurred");
    }
}
