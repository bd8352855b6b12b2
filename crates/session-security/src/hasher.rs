//! SHA-256 token digest

use sha2::{Digest, Sha256};

use session_shared::constants::TOKEN_SEPARATOR;
use session_shared::SessionKey;

/// Hex-encoded SHA-256 of `input`. Always 64 lowercase characters.
pub fn digest(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

/// Token bound to a session id, the server secret and the issuance instant:
/// `digest("{id}-{secret}-{issued_at_ms}")`.
pub fn derive_token(id: &str, secret: &SessionKey, issued_at_ms: i64) -> String {
    let message = format!(
        "{id}{sep}{secret}{sep}{issued_at_ms}",
        secret = secret.expose(),
        sep = TOKEN_SEPARATOR,
    );
    digest(message.as_bytes())
}
