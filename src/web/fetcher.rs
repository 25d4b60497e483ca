//! Page Fetcher
//!
//! HTTP client seam for the page cache. The trait keeps the miss path
//! injectable so tests can count or fail fetches without network I/O.

use async_trait::async_trait;

use crate::error::Result;

// == Fetch Trait ==
/// A blocking-per-call HTTP GET returning the response body as text.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches the body of a URL. Network failures propagate to the caller.
    async fn fetch(&self, url: &str) -> Result<String>;
}

// == HTTP Fetcher ==
/// Production fetcher backed by reqwest.
///
/// No redirect, auth, header, or timeout configuration beyond the client's
/// defaults. The body text is returned regardless of response status, as the
/// cache stores whatever the server sent.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a default reqwest client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        Ok(response.text().await?)
    }
}
