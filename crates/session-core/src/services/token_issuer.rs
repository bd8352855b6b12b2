// ============================================================================
// Session Core - Token Issuer
// File: crates/session-core/src/services/token_issuer.rs
// ============================================================================
//! Session issuance: id generation, token derivation and persistence

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use session_security::{derive_token, generate_session_id};
use session_shared::SessionKey;

use crate::domain::IssuedSession;
use crate::error::DomainError;
use crate::repositories::SessionStore;

/// Creates new sessions and persists their tokens with a TTL.
pub struct TokenIssuer<S: SessionStore + ?Sized> {
    store: Arc<S>,
    secret: SessionKey,
    ttl: Duration,
}

impl<S: SessionStore + ?Sized> TokenIssuer<S> {
    pub fn new(store: Arc<S>, secret: SessionKey, ttl_seconds: u64) -> Self {
        Self {
            store,
            secret,
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Issue a session with a fresh random id, stamped with the current time.
    pub async fn issue(&self) -> Result<IssuedSession, DomainError> {
        let id = generate_session_id();
        let issued_at_ms = Utc::now().timestamp_millis();
        self.issue_with(id, issued_at_ms).await
    }

    /// Issue a session for a given id and issuance instant.
    ///
    /// An existing record under the same id is overwritten.
    pub async fn issue_with(
        &self,
        id: String,
        issued_at_ms: i64,
    ) -> Result<IssuedSession, DomainError> {
        let token = derive_token(&id, &self.secret, issued_at_ms);

        // 1. Persist id -> token; a failed write discards the token
        if let Err(e) = self.store.put(&id, &token, self.ttl).await {
            error!("Failed to persist session {}: {}", id, e);
            return Err(DomainError::StoreWriteFailure(e));
        }

        info!("Session issued: {} (ttl {}s)", id, self.ttl.as_secs());

        Ok(IssuedSession { id, token })
    }
}
