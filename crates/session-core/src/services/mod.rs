//! Domain services (business logic)

pub mod token_issuer;
pub mod token_verifier;

pub use token_issuer::TokenIssuer;
pub use token_verifier::TokenVerifier;
