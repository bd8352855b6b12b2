//! # Session Shared
//! 
//! Configuration, telemetry, constants and shared types for the session token service.

pub mod constants;
pub mod types;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
