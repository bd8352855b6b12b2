//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_EXPIRATION_TTL, DEFAULT_ID_COOKIE, DEFAULT_STORE_MAX_CONNECTIONS,
    DEFAULT_SWEEP_INTERVAL_SECS, DEFAULT_TOKEN_COOKIE,
};
use crate::error::AppError;
use crate::types::{SessionKey, StoreBackend, TransportMode};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// `SESSION_KEY`
    pub session_key: SessionKey,
    /// `EXPIRATION_TTL`, in seconds
    pub expiration_ttl: u64,
    pub app: AppSettings,
    pub transport: TransportSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TransportSettings {
    pub mode: TransportMode,
    #[serde(default)]
    pub cookie_domain: Option<String>,
    pub id_cookie: String,
    pub token_cookie: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    #[serde(default)]
    pub redis_url: Option<String>,
    pub max_connections: u32,
    pub sweep_interval_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::load_with_env(Environment::default().separator("__"))
    }

    /// Builds the configuration with `env` as the highest-priority source.
    ///
    /// Env values are kept as strings; numeric fields convert during
    /// deserialization and `SESSION_KEY` is taken verbatim.
    pub fn load_with_env(env: Environment) -> Result<Self, AppError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("expiration_ttl", DEFAULT_EXPIRATION_TTL as i64)?
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "session-server")?
            .set_default("transport.mode", "path")?
            .set_default("transport.id_cookie", DEFAULT_ID_COOKIE)?
            .set_default("transport.token_cookie", DEFAULT_TOKEN_COOKIE)?
            .set_default("store.backend", "memory")?
            .set_default("store.max_connections", DEFAULT_STORE_MAX_CONNECTIONS as i64)?
            .set_default("store.sweep_interval_secs", DEFAULT_SWEEP_INTERVAL_SECS as i64)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", app_env)).required(false))
            .add_source(env)
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.session_key.is_empty() {
            return Err(AppError::InvalidConfig("SESSION_KEY must not be empty".into()));
        }
        if self.expiration_ttl == 0 {
            return Err(AppError::InvalidConfig("EXPIRATION_TTL must be greater than zero".into()));
        }
        if self.transport.mode == TransportMode::Cookie
            && self.transport.cookie_domain.as_deref().map_or(true, str::is_empty)
        {
            return Err(AppError::InvalidConfig(
                "TRANSPORT__COOKIE_DOMAIN is required in cookie mode".into(),
            ));
        }
        if self.transport.id_cookie == self.transport.token_cookie {
            return Err(AppError::InvalidConfig(
                "id and token cookies must have different names".into(),
            ));
        }
        if self.store.backend == StoreBackend::Redis
            && self.store.redis_url.as_deref().map_or(true, str::is_empty)
        {
            return Err(AppError::InvalidConfig(
                "STORE__REDIS_URL is required for the redis backend".into(),
            ));
        }
        Ok(())
    }
}
