//! # Session Security
//! 
//! Hashing and identifier primitives: token digest, session id generation.

pub mod hasher;
pub mod session_id;

pub use hasher::{derive_token, digest};
pub use session_id::generate_session_id;
