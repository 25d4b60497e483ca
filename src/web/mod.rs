//! Web Module
//!
//! TTL-based webpage cache over the backing store: `get_page` serves cached
//! HTML while an entry is unexpired, fetching and re-caching on miss, and
//! counts every access per URL whether or not it hits.
//!
//! TTL enforcement is delegated to the backend's expiring-set primitive;
//! nothing here tracks timestamps. The check-then-fetch-then-store sequence
//! is intentionally unlocked: concurrent misses may fetch twice, and the
//! last write wins.

mod fetcher;
mod stats;

// Re-export public types
pub use fetcher::{Fetch, HttpFetcher};
pub use stats::FetchStats;

use std::sync::Mutex;

use tracing::debug;

use crate::backend::Backend;
use crate::config::DEFAULT_PAGE_TTL;
use crate::error::{CacheError, Result};

// == Key Derivation ==
/// Per-URL access counter key. The counter never expires.
fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

/// Per-URL cached content key, written with the configured TTL.
fn cache_key(url: &str) -> String {
    format!("cache:{}", url)
}

// == Page Cache ==
/// TTL web-fetch cache over a [`Backend`] and a [`Fetch`] implementation.
#[derive(Debug)]
pub struct PageCache<B: Backend, F: Fetch = HttpFetcher> {
    backend: B,
    fetcher: F,
    /// TTL in seconds applied to cached page content
    ttl: u64,
    stats: Mutex<FetchStats>,
}

impl<B: Backend> PageCache<B> {
    // == Constructors ==
    /// Creates a page cache with the default HTTP fetcher and the default
    /// 10-second TTL.
    pub fn new(backend: B) -> Self {
        Self::with_fetcher(backend, HttpFetcher::new(), DEFAULT_PAGE_TTL)
    }

    /// Creates a page cache with the default HTTP fetcher and a custom TTL.
    pub fn with_ttl(backend: B, ttl_seconds: u64) -> Self {
        Self::with_fetcher(backend, HttpFetcher::new(), ttl_seconds)
    }
}

impl<B: Backend, F: Fetch> PageCache<B, F> {
    /// Creates a page cache with a custom fetcher and TTL.
    pub fn with_fetcher(backend: B, fetcher: F, ttl_seconds: u64) -> Self {
        Self {
            backend,
            fetcher,
            ttl: ttl_seconds,
            stats: Mutex::new(FetchStats::new()),
        }
    }

    // == Get Page ==
    /// Returns the HTML content of a URL, serving from the cache while an
    /// unexpired entry exists.
    ///
    /// The per-URL access counter increments on every call, hit or miss. On
    /// miss the body is fetched, written with the configured TTL, and
    /// returned; the cache entry is only written after the fetch fully
    /// succeeds, so a failed fetch leaves no partial entry.
    pub async fn get_page(&self, url: &str) -> Result<String> {
        self.backend.incr(&count_key(url)).await?;

        if let Some(cached) = self.backend.get(&cache_key(url)).await? {
            debug!("Cache hit for {}", url);
            self.record(FetchStats::record_hit);
            return String::from_utf8(cached).map_err(|e| {
                CacheError::Transform(format!("cached page is not valid UTF-8: {}", e))
            });
        }

        debug!("Cache miss for {}, fetching", url);
        self.record(FetchStats::record_miss);

        let body = self.fetcher.fetch(url).await?;
        self.backend
            .set_ex(&cache_key(url), body.as_bytes(), self.ttl)
            .await?;
        Ok(body)
    }

    // == Access Count ==
    /// Reads the per-URL access counter; 0 if the URL was never requested.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        match self.backend.get(&count_key(url)).await? {
            Some(raw) => std::str::from_utf8(&raw)
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| {
                    CacheError::Backend(format!("access counter for {} is not an integer", url))
                }),
            None => Ok(0),
        }
    }

    // == Stats ==
    /// Returns a snapshot of the local hit/miss statistics.
    pub fn stats(&self) -> FetchStats {
        self.stats.lock().expect("stats lock poisoned").clone()
    }

    fn record(&self, update: fn(&mut FetchStats)) {
        update(&mut self.stats.lock().expect("stats lock poisoned"));
    }
}
