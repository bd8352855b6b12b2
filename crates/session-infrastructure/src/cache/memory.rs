//! In-process session store with per-entry expiry

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use session_core::{SessionStore, StoreError};

use super::entry::Entry;

/// DashMap-backed store. Expired entries are dropped lazily on read and in
/// bulk by [`MemorySessionStore::run_sweeper`].
///
/// Expiry follows the tokio clock, so paused-time tests can advance past a TTL.
#[derive(Default)]
pub struct MemorySessionStore {
    map: DashMap<String, Entry>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let start_len = self.map.len();
        self.map.retain(|_, e| !e.is_expired(now));
        let count = start_len.saturating_sub(self.map.len());

        if count > 0 {
            info!("Purged {} expired sessions", count);
        }

        count
    }

    pub async fn run_sweeper(self: Arc<Self>, every: Duration) {
        loop {
            sleep(every).await;
            let removed = self.purge_expired();
            debug!("Sweep done: removed={}, live={}", removed, self.len());
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| StoreError::Backend(format!("ttl out of range: {:?}", ttl)))?;
        self.map.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        if self.map.remove_if(key, |_, e| e.is_expired(now)).is_some() {
            return Ok(None);
        }
        Ok(self.map.get(key).map(|e| e.value.clone()))
    }
}
