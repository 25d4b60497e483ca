//! In-Memory Backend
//!
//! In-process implementation of the [`Backend`] trait with the same observable
//! semantics as a Redis server: lazy TTL expiry on read, integer INCR
//! semantics, and RPUSH/LRANGE lists with negative index handling.
//!
//! Used by tests and the demo driver; either backend is substitutable.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::backend::Backend;
use crate::error::{CacheError, Result};

// == Stored Entry ==
/// A single scalar entry with an optional expiration instant.
#[derive(Debug, Clone)]
struct StoredEntry {
    /// The stored bytes
    data: Vec<u8>,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    expires_at: Option<u64>,
}

impl StoredEntry {
    fn new(data: Vec<u8>, ttl_seconds: Option<u64>) -> Self {
        let expires_at = ttl_seconds.map(|ttl| current_timestamp_ms() + ttl * 1000);
        Self { data, expires_at }
    }

    /// An entry is expired once the current time reaches the expiration
    /// instant, so a TTL of n seconds ends exactly n seconds after the write.
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }
}

/// Returns current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Inner State ==
#[derive(Debug, Default)]
struct Inner {
    /// Scalar key-value entries
    entries: HashMap<String, StoredEntry>,
    /// Append-only lists
    lists: HashMap<String, Vec<Vec<u8>>>,
}

// == Memory Backend ==
/// In-memory backing store.
///
/// Cloning yields another handle to the same store, mirroring how a Redis
/// client can be cloned while talking to one server. The internal lock is a
/// plain mutex; it is never held across an await point.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-operation; propagating the panic
        // is the only sensible behavior for an in-process test backend.
        self.inner.lock().expect("memory backend lock poisoned")
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut inner = self.lock();
        inner
            .entries
            .insert(key.to_string(), StoredEntry::new(value.to_vec(), None));
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<()> {
        let mut inner = self.lock();
        inner.entries.insert(
            key.to_string(),
            StoredEntry::new(value.to_vec(), Some(ttl_seconds)),
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut inner = self.lock();
        if let Some(entry) = inner.entries.get(key) {
            if entry.is_expired() {
                // Expired entries are removed when observed
                inner.entries.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.data.clone()));
        }
        Ok(None)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut inner = self.lock();

        // An expired counter behaves as absent
        if inner
            .entries
            .get(key)
            .map(StoredEntry::is_expired)
            .unwrap_or(false)
        {
            inner.entries.remove(key);
        }

        let (current, expires_at) = match inner.entries.get(key) {
            Some(entry) => {
                let text = std::str::from_utf8(&entry.data)
                    .map_err(|_| CacheError::Backend(format!("value at {} is not an integer", key)))?;
                let value: i64 = text.parse().map_err(|_| {
                    CacheError::Backend(format!("value at {} is not an integer", key))
                })?;
                (value, entry.expires_at)
            }
            None => (0, None),
        };

        let next = current + 1;
        // INCR preserves the key's remaining TTL, as Redis does
        inner.entries.insert(
            key.to_string(),
            StoredEntry {
                data: next.to_string().into_bytes(),
                expires_at,
            },
        );
        Ok(next)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<i64> {
        let mut inner = self.lock();
        let list = inner.lists.entry(key.to_string()).or_default();
        list.push(value.to_vec());
        Ok(list.len() as i64)
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let inner = self.lock();
        let list = match inner.lists.get(key) {
            Some(list) => list,
            None => return Ok(Vec::new()),
        };

        let len = list.len() as i64;
        let start = if start < 0 { (len + start).max(0) } else { start };
        let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

        if start > stop || start >= len || stop < 0 {
            return Ok(Vec::new());
        }
        Ok(list[start as usize..=stop as usize].to_vec())
    }

    async fn flush(&self) -> Result<()> {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.lists.clear();
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_set_and_get() {
        let backend = MemoryBackend::new();

        backend.set("key1", b"value1").await.unwrap();
        let value = backend.get("key1").await.unwrap();

        assert_eq!(value, Some(b"value1".to_vec()));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let backend = MemoryBackend::new();

        let value = backend.get("nonexistent").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_overwrite() {
        let backend = MemoryBackend::new();

        backend.set("key1", b"value1").await.unwrap();
        backend.set("key1", b"value2").await.unwrap();

        assert_eq!(backend.get("key1").await.unwrap(), Some(b"value2".to_vec()));
    }

    #[tokio::test]
    async fn test_set_ex_expiration() {
        let backend = MemoryBackend::new();

        backend.set_ex("key1", b"value1", 1).await.unwrap();

        // Accessible immediately
        assert!(backend.get("key1").await.unwrap().is_some());

        // Gone after the TTL elapses
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(backend.get("key1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_incr_from_absent() {
        let backend = MemoryBackend::new();

        assert_eq!(backend.incr("counter").await.unwrap(), 1);
        assert_eq!(backend.incr("counter").await.unwrap(), 2);
        assert_eq!(backend.incr("counter").await.unwrap(), 3);

        assert_eq!(backend.get("counter").await.unwrap(), Some(b"3".to_vec()));
    }

    #[tokio::test]
    async fn test_incr_non_integer() {
        let backend = MemoryBackend::new();

        backend.set("key1", b"not a number").await.unwrap();
        let result = backend.incr("key1").await;

        assert!(matches!(result, Err(CacheError::Backend(_))));
    }

    #[tokio::test]
    async fn test_incr_expired_counter_restarts() {
        let backend = MemoryBackend::new();

        backend.set_ex("counter", b"41", 1).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1100)).await;

        // Expired counter behaves as absent
        assert_eq!(backend.incr("counter").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rpush_returns_length() {
        let backend = MemoryBackend::new();

        assert_eq!(backend.rpush("list", b"a").await.unwrap(), 1);
        assert_eq!(backend.rpush("list", b"b").await.unwrap(), 2);
        assert_eq!(backend.rpush("list", b"c").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_lrange_full_list() {
        let backend = MemoryBackend::new();

        backend.rpush("list", b"a").await.unwrap();
        backend.rpush("list", b"b").await.unwrap();
        backend.rpush("list", b"c").await.unwrap();

        let items = backend.lrange("list", 0, -1).await.unwrap();
        assert_eq!(items, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[tokio::test]
    async fn test_lrange_partial_and_negative() {
        let backend = MemoryBackend::new();

        for item in [b"a", b"b", b"c", b"d"] {
            backend.rpush("list", item).await.unwrap();
        }

        assert_eq!(
            backend.lrange("list", 1, 2).await.unwrap(),
            vec![b"b".to_vec(), b"c".to_vec()]
        );
        assert_eq!(
            backend.lrange("list", -2, -1).await.unwrap(),
            vec![b"c".to_vec(), b"d".to_vec()]
        );
        // Stop beyond the end clamps to the last element
        assert_eq!(backend.lrange("list", 2, 100).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_lrange_empty_cases() {
        let backend = MemoryBackend::new();

        assert!(backend.lrange("missing", 0, -1).await.unwrap().is_empty());

        backend.rpush("list", b"a").await.unwrap();
        // Inverted range yields nothing
        assert!(backend.lrange("list", 2, 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_flush_clears_everything() {
        let backend = MemoryBackend::new();

        backend.set("key1", b"value1").await.unwrap();
        backend.rpush("list", b"a").await.unwrap();
        backend.incr("counter").await.unwrap();

        backend.flush().await.unwrap();

        assert_eq!(backend.get("key1").await.unwrap(), None);
        assert_eq!(backend.get("counter").await.unwrap(), None);
        assert!(backend.lrange("list", 0, -1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let backend = MemoryBackend::new();
        let other = backend.clone();

        backend.set("key1", b"value1").await.unwrap();
        assert_eq!(other.get("key1").await.unwrap(), Some(b"value1".to_vec()));
    }
}
