//! API error handling
//!
//! Every error body has the shape `{"detail": "...", "code": "..."}`.
//! Provider failures keep the provider's error text in `detail`.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The selected speech provider failed or is unavailable
    #[error("{0}")]
    Synthesis(String),

    /// The selected speech provider has no configured client
    #[error("{0}")]
    ProviderNotConfigured(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error text
    pub detail: String,
    /// Machine-readable error code
    pub code: &'static str,
}

impl ApiError {
    /// Status code and error code for this error
    #[must_use]
    pub const fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Synthesis(_) => (StatusCode::INTERNAL_SERVER_ERROR, "synthesis_failed"),
            Self::ProviderNotConfigured(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "provider_not_configured")
            },
            Self::RateLimited(_) => (StatusCode::INTERNAL_SERVER_ERROR, "rate_limited"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(code, error = %self, "Request failed");
        }

        let body = ErrorResponse {
            detail: self.to_string(),
            code,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            e @ ApplicationError::Synthesis { .. } => Self::Synthesis(e.to_string()),
            e @ ApplicationError::ProviderNotConfigured(_) => {
                Self::ProviderNotConfigured(e.to_string())
            },
            e @ ApplicationError::RateLimited { .. } => Self::RateLimited(e.to_string()),
            e @ (ApplicationError::ExternalService(_) | ApplicationError::Inference(_)) => {
                Self::Synthesis(e.to_string())
            },
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

impl From<domain::DomainError> for ApiError {
    fn from(err: domain::DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
