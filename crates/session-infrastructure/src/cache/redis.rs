//! Redis-backed session store (`SET key value EX ttl` / `GET key`)

use async_trait::async_trait;
use deadpool_redis::{redis::cmd, Config, Connection, Pool, PoolConfig, Runtime};
use std::time::Duration;
use tracing::info;

use session_core::{SessionStore, StoreError};

pub struct RedisSessionStore {
    pool: Pool,
}

impl RedisSessionStore {
    pub fn new(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let mut pool_cfg = PoolConfig::new(max_connections as usize);
        pool_cfg.timeouts.wait = Some(Duration::from_secs(3));
        pool_cfg.timeouts.create = Some(Duration::from_secs(3));

        let mut cfg = Config::from_url(url);
        cfg.pool = Some(pool_cfg);

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        info!("Redis session store pool created (max {} connections)", max_connections);
        Ok(Self { pool })
    }

    async fn connection(&self) -> Result<Connection, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        // EX takes whole seconds and rejects 0
        cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        cmd("GET")
            .arg(key)
            .query_async::<Option<String>>(&mut conn)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
