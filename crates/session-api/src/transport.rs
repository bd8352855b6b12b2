// ============================================================================
// Session API - Transport Binding
// File: crates/session-api/src/transport.rs
// ============================================================================
//! Encoding of the `(id, token)` pair at the HTTP boundary
//!
//! A deployment picks one binding at startup:
//! - `PathParam`: issue returns `[id, token]`, verify reads `/verify/{id}/{token}`.
//!   Failures name the cause ("Session ID invalid" / "Session token invalid").
//! - `Cookie`: issue also sets two cookies, verify reads them from the `Cookie`
//!   header. Failures are a bare 401 that expires both cookies, without saying
//!   which half was wrong.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use session_core::{IssuedSession, VerificationOutcome};
use session_shared::{config::AppConfig, AppError, TransportMode};

use crate::error::ApiError;
use crate::response::{json_response, JSON_CONTENT_TYPE};

pub const PATH_VERIFY_ROUTE: &str = "/verify/{id}/{token}";
pub const COOKIE_VERIFY_ROUTE: &str = "/verify";

#[derive(Debug, Clone)]
pub enum TransportBinding {
    PathParam,
    Cookie(CookieBinding),
}

#[derive(Debug, Clone)]
pub struct CookieBinding {
    domain: String,
    id_cookie: String,
    token_cookie: String,
    max_age: time::Duration,
}

/// Session id and token as presented by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub id: String,
    pub token: String,
}

impl TransportBinding {
    pub fn path_param() -> Self {
        Self::PathParam
    }

    pub fn cookie(
        domain: impl Into<String>,
        id_cookie: impl Into<String>,
        token_cookie: impl Into<String>,
        max_age_seconds: u64,
    ) -> Self {
        Self::Cookie(CookieBinding {
            domain: domain.into(),
            id_cookie: id_cookie.into(),
            token_cookie: token_cookie.into(),
            max_age: time::Duration::seconds(i64::try_from(max_age_seconds).unwrap_or(i64::MAX)),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let transport = &config.transport;
        match transport.mode {
            TransportMode::Path => Ok(Self::path_param()),
            TransportMode::Cookie => {
                let domain = transport.cookie_domain.clone().ok_or_else(|| {
                    AppError::InvalidConfig("cookie transport needs a cookie domain".into())
                })?;
                Ok(Self::cookie(
                    domain,
                    transport.id_cookie.clone(),
                    transport.token_cookie.clone(),
                    config.expiration_ttl,
                ))
            }
        }
    }

    pub fn verify_route(&self) -> &'static str {
        match self {
            Self::PathParam => PATH_VERIFY_ROUTE,
            Self::Cookie(_) => COOKIE_VERIFY_ROUTE,
        }
    }

    /// 201 with `[id, token]`; the cookie binding adds one cookie per value.
    pub fn issued(&self, session: &IssuedSession) -> Response {
        let body = json_response(StatusCode::CREATED, &[&session.id, &session.token]);
        match self {
            Self::PathParam => body,
            Self::Cookie(c) => {
                let jar = CookieJar::new()
                    .add(c.session_cookie(&c.id_cookie, session.id.clone()))
                    .add(c.session_cookie(&c.token_cookie, session.token.clone()));
                (jar, body).into_response()
            }
        }
    }

    pub fn verified(&self, outcome: VerificationOutcome) -> Response {
        match (self, outcome) {
            (Self::PathParam, VerificationOutcome::Valid) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/plain;charset=utf-8")],
                "OK",
            )
                .into_response(),
            (Self::PathParam, VerificationOutcome::InvalidId) => {
                ApiError::Unauthorized("Session ID invalid".into()).into_response()
            }
            (Self::PathParam, VerificationOutcome::InvalidToken) => {
                ApiError::Unauthorized("Session token invalid".into()).into_response()
            }
            (Self::Cookie(_), VerificationOutcome::Valid) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
                "true",
            )
                .into_response(),
            (Self::Cookie(c), _) => (StatusCode::UNAUTHORIZED, c.clearing_jar()).into_response(),
        }
    }
}

impl CookieBinding {
    /// Both cookies, or `None` if either is missing.
    pub fn claim(&self, jar: &CookieJar) -> Option<Claim> {
        let id = jar.get(&self.id_cookie)?.value().to_owned();
        let token = jar.get(&self.token_cookie)?.value().to_owned();
        Some(Claim { id, token })
    }

    fn session_cookie(&self, name: &str, value: String) -> Cookie<'static> {
        let mut cookie = self.base_cookie(name, value);
        cookie.set_max_age(self.max_age);
        cookie
    }

    fn clearing_jar(&self) -> CookieJar {
        CookieJar::new()
            .add(self.expired_cookie(&self.id_cookie))
            .add(self.expired_cookie(&self.token_cookie))
    }

    fn expired_cookie(&self, name: &str) -> Cookie<'static> {
        let mut cookie = self.base_cookie(name, String::new());
        cookie.set_max_age(time::Duration::ZERO);
        cookie
    }

    fn base_cookie(&self, name: &str, value: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(name.to_owned(), value);
        cookie.set_domain(self.domain.clone());
        cookie.set_path("/");
        cookie.set_secure(true);
        cookie.set_same_site(SameSite::Strict);
        cookie
    }
}
