use std::sync::Arc;

use session_core::{SessionStore, TokenIssuer, TokenVerifier};
use session_shared::{config::AppConfig, AppError, SessionKey};

use crate::middleware::CorsPolicy;
use crate::transport::TransportBinding;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<TokenIssuer<dyn SessionStore>>,
    pub verifier: Arc<TokenVerifier<dyn SessionStore>>,
    pub binding: Arc<TransportBinding>,
    pub cors: Arc<CorsPolicy>,
}

impl AppState {
    pub fn new(store: Arc<dyn SessionStore>, config: &AppConfig) -> Result<Self, AppError> {
        let binding = TransportBinding::from_config(config)?;
        Ok(Self::with_binding(
            store,
            config.session_key.clone(),
            config.expiration_ttl,
            binding,
        ))
    }

    pub fn with_binding(
        store: Arc<dyn SessionStore>,
        secret: SessionKey,
        ttl_seconds: u64,
        binding: TransportBinding,
    ) -> Self {
        Self {
            issuer: Arc::new(TokenIssuer::new(store.clone(), secret, ttl_seconds)),
            verifier: Arc::new(TokenVerifier::new(store)),
            binding: Arc::new(binding),
            cors: Arc::new(CorsPolicy::permissive()),
        }
    }
}
