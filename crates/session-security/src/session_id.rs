//! Session identifier generation

use rand::Rng;

use session_shared::constants::{SESSION_ID_ALPHABET, SESSION_ID_LENGTH};

/// Random `[0-9a-z]` identifier of `SESSION_ID_LENGTH` characters.
///
/// Drawn from the thread-local CSPRNG. Uniqueness is not checked against
/// live records.
pub fn generate_session_id() -> String {
    let mut rng = rand::rng();
    (0..SESSION_ID_LENGTH)
        .map(|_| SESSION_ID_ALPHABET[rng.random_range(0..SESSION_ID_ALPHABET.len())] as char)
        .collect()
}
