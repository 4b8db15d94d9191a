//! # API Errors
//!
//! Error types returned by the request handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::mapper::MappingError;
use crate::schema::{ValidationError, Violation};
use crate::store::StorageError;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned for every server-side failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body is not JSON or not sent as JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Invalid query parameter
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Body is JSON but violates the request schema
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQueryParam(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Mapping(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQueryParam(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<Violation>>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let code = err.status_code().as_u16();
        if err.is_server_error() {
            return Self {
                error: INTERNAL_ERROR_MESSAGE.to_string(),
                code,
                violations: None,
            };
        }

        let error = err.to_string();
        let violations = match err {
            ApiError::Validation(e) => Some(e.violations),
            _ => None,
        };
        Self {
            error,
            code,
            violations,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}
