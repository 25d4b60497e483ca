//! Error types for the instrumented cache
//!
//! Provides unified error handling using thiserror.
//!
//! A missing key is not an error anywhere in this crate: reads return
//! `Ok(None)` for absent identifiers and expired cache entries. The variants
//! below cover the failures that do surface, and all of them propagate to the
//! caller immediately; there is no internal retry or recovery layer.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache library.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backing store failure: connection errors, protocol errors, or an
    /// operation applied to an incompatible value (e.g. INCR on a non-integer)
    #[error("Backend error: {0}")]
    Backend(String),

    /// A value was retrieved but rejected by the requested interpretation
    /// (e.g. non-numeric text parsed as an integer)
    #[error("Transform error: {0}")]
    Transform(String),

    /// HTTP failure while fetching a page on the cache-miss path
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;
