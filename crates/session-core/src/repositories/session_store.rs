//! Session store trait (port)

use async_trait::async_trait;
use std::time::Duration;

use crate::error::StoreError;

/// Key-value store with per-entry expiry.
///
/// `put` is atomic per key and overwrites any existing value. `get` returns
/// `None` for keys that were never written or whose TTL has elapsed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}
