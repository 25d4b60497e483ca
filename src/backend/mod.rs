//! Backend Module
//!
//! Abstraction over the backing key-value store consumed by both the
//! instrumented cache and the page cache.
//!
//! The trait exposes exactly the primitives the library needs: plain and
//! expiring writes, reads, atomic integer increment, and append-only lists.
//! TTL enforcement belongs to the backend; callers never track timestamps.

mod memory;
mod redis;

// Re-export public types
pub use memory::MemoryBackend;
pub use redis::RedisBackend;

use async_trait::async_trait;

use crate::error::Result;

// == Backend Trait ==
/// The key-value primitives required from a backing store.
///
/// Each method maps to a single atomic operation in the store. No cross-key
/// transactional guarantees are assumed or provided.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Stores a value under a key with no expiration.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Stores a value under a key, expiring after `ttl_seconds`.
    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<()>;

    /// Reads the value for a key. Absent or expired keys yield `None`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically increments the integer value at a key, returning the new
    /// value. An absent key counts as 0, so the first increment yields 1.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Appends a value to the list at a key, returning the new list length.
    async fn rpush(&self, key: &str, value: &[u8]) -> Result<i64>;

    /// Reads a range of list elements using Redis index semantics: negative
    /// indices count from the tail, and `(0, -1)` reads the whole list.
    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Removes every key from the store. This is the only way counters and
    /// call-history logs are ever reset.
    async fn flush(&self) -> Result<()>;
}
