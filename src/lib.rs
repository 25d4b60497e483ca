//! tracecache - an instrumented key-value store with call tracing and a
//! TTL webpage cache
//!
//! Two independent components over a Redis-like backing store: a value store
//! whose operations carry persisted invocation counters and call histories,
//! and a webpage cache with TTL expiration and per-URL access counting.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod web;

pub use backend::{Backend, MemoryBackend, RedisBackend};
pub use cache::{Cache, Value, STORE_OP};
pub use config::Config;
pub use error::{CacheError, Result};
pub use web::{Fetch, FetchStats, HttpFetcher, PageCache};
