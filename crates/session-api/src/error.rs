use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use session_core::DomainError;

use crate::response::{json_response, ErrorBody};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad Request")]
    BadRequest,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    StoreWriteFailure(String),

    #[error("{0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::StoreWriteFailure(_) => ApiError::StoreWriteFailure(e.to_string()),
            DomainError::StoreReadFailure(_) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest => {
                tracing::debug!("Bad request");
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(msg) => {
                tracing::debug!("Unauthorized: {}", msg);
                StatusCode::UNAUTHORIZED
            }
            ApiError::StoreWriteFailure(msg) => {
                tracing::error!("Store write failure: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = self.to_string();
        json_response(status, &ErrorBody { err: &message })
    }
}
