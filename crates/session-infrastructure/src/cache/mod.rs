//! Key-value store adapters

pub mod entry;
pub mod memory;
pub mod redis;

pub use memory::MemorySessionStore;
pub use redis::RedisSessionStore;
