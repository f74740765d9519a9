//! # API Errors
//!
//! Every failure a request can hit. Domain failures are reported in a
//! `{ok: false}` envelope with status 200; only store and encoding faults
//! change the HTTP status.

use axum::http::StatusCode;
use thiserror::Error;

use crate::catalog::StoreError;
use crate::selector::SelectorError;
use crate::validation::ValidationError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Domain errors (200)
    // ==================
    /// Bad `q` selector on the list endpoint
    #[error(transparent)]
    Selector(#[from] SelectorError),

    /// Arguments rejected by the endpoint schema
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Boulder lookup miss
    #[error("no record found for id {0}")]
    NotFound(i64),

    // ==================
    // Faults (500)
    // ==================
    /// Catalog store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Response body could not be encoded
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Selector(_) | ApiError::Validation(_) | ApiError::NotFound(_) => {
                StatusCode::OK
            }
            ApiError::Store(_) | ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this is a fault rather than a rejected request
    pub fn is_fault(&self) -> bool {
        self.status_code().is_server_error()
    }
}
