//! # Session Core
//! 
//! Session lifecycle: token issuance, verification and the store port they run against.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

pub use domain::*;
pub use error::{DomainError, StoreError};
pub use repositories::SessionStore;
pub use services::{TokenIssuer, TokenVerifier};
