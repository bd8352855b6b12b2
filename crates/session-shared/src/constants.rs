//! Application-wide constants

pub const DEFAULT_EXPIRATION_TTL: u64 = 300;
pub const SESSION_ID_LENGTH: usize = 16;
pub const SESSION_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
pub const TOKEN_SEPARATOR: &str = "-";
pub const DEFAULT_ID_COOKIE: &str = "session_id";
pub const DEFAULT_TOKEN_COOKIE: &str = "session_token";
pub const DEFAULT_STORE_MAX_CONNECTIONS: u32 = 16;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
