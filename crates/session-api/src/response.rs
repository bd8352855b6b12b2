//! JSON response helpers

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// `{ "err": "<message>" }`
#[derive(Serialize)]
pub struct ErrorBody<'a> {
    pub err: &'a str,
}

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string(body) {
        Ok(json) => (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], json).into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize response body: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
