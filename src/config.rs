//! Configuration Module
//!
//! Handles loading library configuration from environment variables.

use std::env;

/// Default time-to-live for cached pages, in seconds.
pub const DEFAULT_PAGE_TTL: u64 = 10;

/// Library configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backing store URL; None selects the in-memory backend
    pub redis_url: Option<String>,
    /// TTL in seconds for cached webpage content
    pub page_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Backing store URL (default: unset, in-memory backend)
    /// - `PAGE_TTL` - Page cache TTL in seconds (default: 10)
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").ok(),
            page_ttl: env::var("PAGE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PAGE_TTL),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            page_ttl: DEFAULT_PAGE_TTL,
        }
    }
}
