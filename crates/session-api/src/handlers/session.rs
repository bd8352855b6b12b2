// ============================================================================
// Session API - Session Handlers
// File: crates/session-api/src/handlers/session.rs
// ============================================================================
//! Issue and verify handlers, one verify flavour per transport binding

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use session_core::VerificationOutcome;

use crate::error::ApiError;
use crate::state::AppState;
use crate::transport::TransportBinding;

/// GET /new
pub async fn issue(State(state): State<AppState>) -> Result<Response, ApiError> {
    let session = state.issuer.issue().await?;
    Ok(state.binding.issued(&session))
}

/// GET /verify/{id}/{token}
///
/// An empty or undecodable segment does not match the route: 400, no store read.
pub async fn verify_path(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path((id, token)) = path.map_err(|rejection| {
        debug!("Rejected verify path: {}", rejection.body_text());
        ApiError::BadRequest
    })?;
    if id.is_empty() || token.is_empty() {
        return Err(ApiError::BadRequest);
    }

    let outcome = state.verifier.verify(&id, &token).await?;
    Ok(state.binding.verified(outcome))
}

/// GET /verify, id and token read from cookies
pub async fn verify_cookie(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    let TransportBinding::Cookie(binding) = state.binding.as_ref() else {
        return Err(ApiError::InternalError(
            "cookie verification on a non-cookie binding".into(),
        ));
    };

    let Some(claim) = binding.claim(&jar) else {
        debug!("Verification request without session cookies");
        return Ok(state.binding.verified(VerificationOutcome::InvalidId));
    };

    let outcome = state.verifier.verify(&claim.id, &claim.token).await?;
    Ok(state.binding.verified(outcome))
}
