//! # Session Infrastructure
//! 
//! Session store implementations (adapters).

pub mod cache;

pub use cache::{MemorySessionStore, RedisSessionStore};
