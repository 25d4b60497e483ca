//! Cache Store Module
//!
//! The instrumented key-value store wrapper: stores scalar values under
//! random identifiers and records, for the store operation, an invocation
//! counter and an argument/result history, all in the same backing store.

use uuid::Uuid;

use crate::backend::Backend;
use crate::cache::instrument;
use crate::cache::Value;
use crate::error::{CacheError, Result};

/// Qualified name of the store operation, used to derive its counter and
/// history keys.
pub const STORE_OP: &str = "Cache::store";

// == Cache ==
/// Instrumented key-value store over a [`Backend`].
///
/// The backend handle is constructed by the caller and passed in, giving the
/// connection an explicit lifecycle instead of module-level shared state.
#[derive(Debug, Clone)]
pub struct Cache<B: Backend> {
    backend: B,
}

impl<B: Backend> Cache<B> {
    // == Constructor ==
    /// Creates a cache over an already-open backend handle.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    // == Store ==
    /// Stores a scalar value under a freshly generated random identifier and
    /// returns the identifier.
    ///
    /// The operation is instrumented: its invocation counter increments
    /// before the write, and the rendered argument and returned identifier
    /// are appended to the call history once the write succeeds.
    pub async fn store(&self, value: impl Into<Value>) -> Result<String> {
        let value = value.into();
        let args = format!("({})", value);
        let data = value.into_bytes();
        let backend = &self.backend;

        instrument::count_calls(backend, STORE_OP, || async {
            instrument::call_history(backend, STORE_OP, &args, || async {
                let id = Uuid::new_v4().to_string();
                backend.set(&id, &data).await?;
                Ok(id)
            })
            .await
        })
        .await
    }

    // == Fetch ==
    /// Reads the raw value for an identifier and applies a transform.
    ///
    /// An absent identifier yields `Ok(None)`, never an error. Transform
    /// failures propagate to the caller untouched; nothing validates what
    /// was originally stored.
    pub async fn fetch<T, F>(&self, id: &str, transform: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        match self.backend.get(id).await? {
            Some(raw) => Ok(Some(transform(raw)?)),
            None => Ok(None),
        }
    }

    /// Reads the raw bytes for an identifier.
    pub async fn fetch_raw(&self, id: &str) -> Result<Option<Vec<u8>>> {
        self.fetch(id, Ok).await
    }

    /// Reads a value as UTF-8 text.
    pub async fn fetch_text(&self, id: &str) -> Result<Option<String>> {
        self.fetch(id, |raw| {
            String::from_utf8(raw)
                .map_err(|e| CacheError::Transform(format!("value is not valid UTF-8: {}", e)))
        })
        .await
    }

    /// Reads a value as a decimal integer.
    pub async fn fetch_int(&self, id: &str) -> Result<Option<i64>> {
        self.fetch(id, |raw| {
            std::str::from_utf8(&raw)
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| {
                    CacheError::Transform(format!(
                        "value {:?} is not an integer",
                        String::from_utf8_lossy(&raw)
                    ))
                })
        })
        .await
    }

    // == Replay ==
    /// Renders the recorded call history of an operation as a transcript:
    /// a summary line followed by one `"<op>(*<args>) -> <result>"` line per
    /// invocation, in invocation order.
    pub async fn replay(&self, op: &str) -> Result<String> {
        let calls = instrument::history(&self.backend, op).await?;

        let mut transcript = format!("{} was called {} times:\n", op, calls.len());
        for (args, result) in &calls {
            transcript.push_str(&format!("{}(*{}) -> {}\n", op, args, result));
        }
        Ok(transcript)
    }

    // == Call Count ==
    /// Reads the invocation counter for an operation; 0 if never invoked.
    pub async fn call_count(&self, op: &str) -> Result<i64> {
        instrument::call_count(&self.backend, op).await
    }
}
