//! Issued sessions and verification results

/// Identifier and token handed to the client on issuance.
///
/// Only `token` is persisted, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub id: String,
    pub token: String,
}

/// Classification of a claimed `(id, token)` pair against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Valid,
    /// No live record for the id (never issued, or expired)
    InvalidId,
    /// A live record exists but holds a different token
    InvalidToken,
}

impl VerificationOutcome {
    pub fn classify(stored: Option<&str>, claimed_token: &str) -> Self {
        match stored {
            None => Self::InvalidId,
            Some(stored) if stored == claimed_token => Self::Valid,
            Some(_) => Self::InvalidToken,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::InvalidId => "invalid_id",
            Self::InvalidToken => "invalid_token",
        }
    }
}
