use axum::{
    handler::Handler,
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::handlers::{self, session};
use crate::middleware::cors_middleware;
use crate::state::AppState;
use crate::transport::TransportBinding;

/// GET only; HEAD and every other method fall through to 400.
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler)
        .head(handlers::bad_request)
        .fallback(handlers::bad_request)
}

pub fn build_router(state: AppState) -> Router {
    let verify = match state.binding.as_ref() {
        TransportBinding::PathParam => get_only(session::verify_path),
        TransportBinding::Cookie(_) => get_only(session::verify_cookie),
    };

    Router::new()
        .route("/health", get_only(handlers::health::health_check))
        .route("/new", get_only(session::issue))
        .route(state.binding.verify_route(), verify)
        .fallback(handlers::bad_request)
        .with_state(state.clone())
        // CORS (also answers OPTIONS before routing)
        .layer(middleware::from_fn_with_state(state.cors.clone(), cors_middleware))
        // Tracing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, HeaderMap, Method, Request, StatusCode},
        response::Response,
    };
    use session_core::{SessionStore, StoreError};
    use session_infrastructure::MemorySessionStore;
    use session_shared::SessionKey;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    struct FailingStore;

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn put(&self, _: &str, _: &str, _: Duration) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn get(&self, _: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Backend("read timeout".into()))
        }
    }

    fn app_with(binding: TransportBinding) -> (Router, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        let state = AppState::with_binding(store.clone(), SessionKey::new("s3cret"), 300, binding);
        (build_router(state), store)
    }

    fn path_app() -> (Router, Arc<MemorySessionStore>) {
        app_with(TransportBinding::path_param())
    }

    fn cookie_app() -> (Router, Arc<MemorySessionStore>) {
        app_with(TransportBinding::cookie(
            "example.com",
            "session_id",
            "session_token",
            300,
        ))
    }

    async fn send(app: &Router, method: Method, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        app.clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn issue(app: &Router) -> (String, String, HeaderMap) {
        let response = send(app, Method::GET, "/new", None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let headers = response.headers().clone();
        let pair: (String, String) = serde_json::from_str(&body_string(response).await).unwrap();
        (pair.0, pair.1, headers)
    }

    fn assert_cors(headers: &HeaderMap) {
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
    }

    fn set_cookies(headers: &HeaderMap) -> Vec<String> {
        headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_path_issue_then_verify() {
        let (app, store) = path_app();
        let (id, token, headers) = issue(&app).await;

        assert_eq!(token.len(), 64);
        assert_eq!(store.len(), 1);
        assert_eq!(
            headers[header::CONTENT_TYPE],
            "application/json;charset=utf-8"
        );
        assert_cors(&headers);

        let ok = send(&app, Method::GET, &format!("/verify/{id}/{token}"), None).await;
        assert_eq!(ok.status(), StatusCode::OK);
        assert_cors(ok.headers());
        assert_eq!(body_string(ok).await, "OK");
    }

    #[tokio::test]
    async fn test_path_wrong_token_and_unknown_id_are_distinguished() {
        let (app, _) = path_app();
        let (id, token, _) = issue(&app).await;

        let wrong_token = send(&app, Method::GET, &format!("/verify/{id}/{token}x"), None).await;
        assert_eq!(wrong_token.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(wrong_token).await, r#"{"err":"Session token invalid"}"#);

        let unknown_id = send(&app, Method::GET, &format!("/verify/zzzz/{token}"), None).await;
        assert_eq!(unknown_id.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(unknown_id).await, r#"{"err":"Session ID invalid"}"#);
    }

    #[tokio::test(start_paused = true)]
    async fn test_path_session_expires_after_ttl() {
        let (app, _) = path_app();
        let (id, token, _) = issue(&app).await;

        tokio::time::advance(Duration::from_secs(301)).await;

        let expired = send(&app, Method::GET, &format!("/verify/{id}/{token}"), None).await;
        assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(expired).await, r#"{"err":"Session ID invalid"}"#);
    }

    #[tokio::test]
    async fn test_options_on_any_path() {
        let (app, store) = path_app();
        for uri in ["/", "/new", "/verify/a/b", "/anything/else"] {
            let response = send(&app, Method::OPTIONS, uri, None).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_cors(response.headers());
            assert!(body_string(response).await.is_empty());
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_routes_are_bad_requests() {
        let (app, store) = path_app();
        let cases = [
            (Method::GET, "/"),
            (Method::GET, "/unknown"),
            (Method::GET, "/verify"),
            (Method::GET, "/verify/only-id"),
            (Method::GET, "/verify/a/b/c"),
            (Method::GET, "/verify//abc"),
            (Method::GET, "/verify/abc/"),
            (Method::POST, "/new"),
            (Method::HEAD, "/new"),
            (Method::DELETE, "/verify/a/b"),
        ];

        for (method, uri) in cases {
            let response = send(&app, method.clone(), uri, None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
            assert_cors(response.headers());
            if method != Method::HEAD {
                assert_eq!(body_string(response).await, r#"{"err":"Bad Request"}"#);
            }
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_path_segment_is_json_bad_request() {
        let (app, store) = path_app();
        let response = send(&app, Method::GET, "/verify/%FF/abc", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json;charset=utf-8"
        );
        assert_cors(response.headers());
        assert_eq!(body_string(response).await, r#"{"err":"Bad Request"}"#);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_store_write_failure_returns_500() {
        let state = AppState::with_binding(
            Arc::new(FailingStore),
            SessionKey::new("s3cret"),
            300,
            TransportBinding::path_param(),
        );
        let app = build_router(state);

        let response = send(&app, Method::GET, "/new", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(response.headers());
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body["err"].as_str().unwrap().contains("write failed"));

        let response = send(&app, Method::GET, "/verify/a/b", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_cookie_issue_sets_cookies() {
        let (app, _) = cookie_app();
        let (id, token, headers) = issue(&app).await;

        let cookies = set_cookies(&headers);
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().any(|c| c.starts_with(&format!("session_id={id};"))));
        assert!(cookies.iter().any(|c| c.starts_with(&format!("session_token={token};"))));
        assert!(cookies
            .iter()
            .all(|c| c.contains("Secure") && c.contains("SameSite=Strict")));
    }

    #[tokio::test]
    async fn test_cookie_verify_round_trip() {
        let (app, _) = cookie_app();
        let (id, token, _) = issue(&app).await;

        let cookie = format!("session_id={id}; session_token={token}");
        let ok = send(&app, Method::GET, "/verify", Some(&cookie)).await;
        assert_eq!(ok.status(), StatusCode::OK);
        assert!(set_cookies(ok.headers()).is_empty());
        assert_eq!(body_string(ok).await, "true");
    }

    #[tokio::test]
    async fn test_cookie_failed_verification_clears_cookies() {
        let (app, _) = cookie_app();
        let (id, token, _) = issue(&app).await;

        let bad_cookies = [
            Some(format!("session_id={id}; session_token={token}x")),
            Some(format!("session_id=unknown; session_token={token}")),
            Some(format!("session_id={id}")),
            None,
        ];

        for cookie in bad_cookies {
            let response = send(&app, Method::GET, "/verify", cookie.as_deref()).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let cleared = set_cookies(response.headers());
            assert_eq!(cleared.len(), 2);
            assert!(cleared.iter().any(|c| c.starts_with("session_id=;")));
            assert!(cleared.iter().any(|c| c.starts_with("session_token=;")));
            assert!(cleared.iter().all(|c| c.contains("Max-Age=0")));
            assert!(body_string(response).await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_cookie_store_failure_returns_500_without_cookies() {
        let state = AppState::with_binding(
            Arc::new(FailingStore),
            SessionKey::new("s3cret"),
            300,
            TransportBinding::cookie("example.com", "session_id", "session_token", 300),
        );
        let app = build_router(state);

        let response = send(
            &app,
            Method::GET,
            "/verify",
            Some("session_id=a; session_token=b"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(set_cookies(response.headers()).is_empty());
        assert_cors(response.headers());
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body["err"].as_str().unwrap().contains("read timeout"));

        let response = send(&app, Method::GET, "/new", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(set_cookies(response.headers()).is_empty());
    }

    #[tokio::test]
    async fn test_cookie_binding_has_no_path_verify_route() {
        let (app, _) = cookie_app();
        let response = send(&app, Method::GET, "/verify/a/b", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = path_app();
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(response.headers());
    }
}
