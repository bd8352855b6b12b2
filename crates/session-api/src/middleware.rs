//! CORS policy applied to every response

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Fixed set of CORS headers, built once at startup.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsPolicy {
    /// Any origin, `GET, OPTIONS`, any header.
    pub fn permissive() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_methods: HeaderValue::from_static("GET, OPTIONS"),
            allow_headers: HeaderValue::from_static("*"),
        }
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::permissive()
    }
}

/// Answers `OPTIONS` on any path with an empty 200 and stamps the policy on
/// everything else.
pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    policy.apply(response.headers_mut());
    response
}
