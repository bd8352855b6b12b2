//! HTTP handlers

pub mod health;
pub mod session;

use crate::error::ApiError;

/// Catch-all for unknown paths and unsupported methods.
pub async fn bad_request() -> ApiError {
    ApiError::BadRequest
}
