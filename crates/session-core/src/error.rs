//! Domain errors

use thiserror::Error;

/// Failure reported by a session store adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Session store write failed: {0}")]
    StoreWriteFailure(#[source] StoreError),

    #[error("Session store read failed: {0}")]
    StoreReadFailure(#[source] StoreError),
}
