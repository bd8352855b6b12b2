//! Session verification: read-and-compare against the store

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::domain::VerificationOutcome;
use crate::error::DomainError;
use crate::repositories::SessionStore;

/// Checks claimed `(id, token)` pairs. Never writes to the store.
pub struct TokenVerifier<S: SessionStore + ?Sized> {
    store: Arc<S>,
}

impl<S: SessionStore + ?Sized> TokenVerifier<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn verify(
        &self,
        claimed_id: &str,
        claimed_token: &str,
    ) -> Result<VerificationOutcome, DomainError> {
        let stored = self.store.get(claimed_id).await.map_err(|e| {
            error!("Failed to read session {}: {}", claimed_id, e);
            DomainError::StoreReadFailure(e)
        })?;

        let outcome = VerificationOutcome::classify(stored.as_deref(), claimed_token);
        if outcome.is_valid() {
            debug!("Session verified: {}", claimed_id);
        } else {
            warn!("Session verification failed for {}: {}", claimed_id, outcome.as_str());
        }

        Ok(outcome)
    }
}
