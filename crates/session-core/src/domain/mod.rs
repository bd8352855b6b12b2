//! Domain types

pub mod session;

pub use session::{IssuedSession, VerificationOutcome};
