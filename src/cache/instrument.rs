//! Instrumentation Module
//!
//! Cross-cutting call instrumentation for store operations: an invocation
//! counter and an append-only argument/result history, both persisted in the
//! backing store alongside the data itself.
//!
//! The wrappers compose around any async operation without touching its
//! body, so additional instrumented operations can be added by wrapping
//! rather than by editing. Counter and log keys derive deterministically
//! from the operation's qualified name, so operations never collide:
//!
//! - `<op>`          - invocation counter
//! - `<op>:inputs`   - rendered argument tuples, in invocation order
//! - `<op>:outputs`  - rendered results, positionally matching the inputs

use std::fmt;
use std::future::Future;

use crate::backend::Backend;
use crate::error::{CacheError, Result};

// == Key Derivation ==
/// Counter key for an operation: the qualified name itself.
pub fn count_key(op: &str) -> String {
    op.to_string()
}

/// List key holding the rendered arguments of each invocation.
pub fn inputs_key(op: &str) -> String {
    format!("{}:inputs", op)
}

/// List key holding the rendered result of each invocation.
pub fn outputs_key(op: &str) -> String {
    format!("{}:outputs", op)
}

// == Count Calls ==
/// Increments the invocation counter for `op`, then runs the wrapped
/// operation.
///
/// The increment happens before the operation executes, so a failing
/// operation still counts as an attempt.
pub async fn count_calls<B, T, F, Fut>(backend: &B, op: &str, call: F) -> Result<T>
where
    B: Backend + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    backend.incr(&count_key(op)).await?;
    call().await
}

// == Call History ==
/// Runs the wrapped operation and, on success, appends the rendered
/// arguments and result to the operation's history lists.
///
/// Both appends happen after the operation succeeds, keeping the two lists
/// the same length even when an invocation fails partway.
pub async fn call_history<B, T, F, Fut>(backend: &B, op: &str, args: &str, call: F) -> Result<T>
where
    B: Backend + ?Sized,
    T: fmt::Display,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let result = call().await?;
    backend.rpush(&inputs_key(op), args.as_bytes()).await?;
    backend
        .rpush(&outputs_key(op), result.to_string().as_bytes())
        .await?;
    Ok(result)
}

// == Readers ==
/// Reads the invocation counter for an operation; 0 if never invoked.
pub async fn call_count<B>(backend: &B, op: &str) -> Result<i64>
where
    B: Backend + ?Sized,
{
    match backend.get(&count_key(op)).await? {
        Some(raw) => std::str::from_utf8(&raw)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| CacheError::Backend(format!("counter for {} is not an integer", op))),
        None => Ok(0),
    }
}

/// Reads the full call history for an operation as (args, result) pairs in
/// invocation order.
pub async fn history<B>(backend: &B, op: &str) -> Result<Vec<(String, String)>>
where
    B: Backend + ?Sized,
{
    let inputs = backend.lrange(&inputs_key(op), 0, -1).await?;
    let outputs = backend.lrange(&outputs_key(op), 0, -1).await?;

    Ok(inputs
        .into_iter()
        .zip(outputs)
        .map(|(args, result)| {
            (
                String::from_utf8_lossy(&args).into_owned(),
                String::from_utf8_lossy(&result).into_owned(),
            )
        })
        .collect())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[tokio::test]
    async fn test_count_calls_increments_before_op() {
        let backend = MemoryBackend::new();

        let result = count_calls(&backend, "op", || async { Ok(7) }).await.unwrap();

        assert_eq!(result, 7);
        assert_eq!(call_count(&backend, "op").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_count_calls_counts_failed_attempts() {
        let backend = MemoryBackend::new();

        let result: Result<i64> = count_calls(&backend, "op", || async {
            Err(CacheError::Backend("boom".to_string()))
        })
        .await;

        assert!(result.is_err());
        // The attempt was still counted
        assert_eq!(call_count(&backend, "op").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_call_history_records_pair() {
        let backend = MemoryBackend::new();

        let result = call_history(&backend, "op", "(\"x\")", || async {
            Ok("result".to_string())
        })
        .await
        .unwrap();

        assert_eq!(result, "result");
        let calls = history(&backend, "op").await.unwrap();
        assert_eq!(calls, vec![("(\"x\")".to_string(), "result".to_string())]);
    }

    #[tokio::test]
    async fn test_call_history_skips_failed_op() {
        let backend = MemoryBackend::new();

        let result: Result<String> = call_history(&backend, "op", "(\"x\")", || async {
            Err(CacheError::Backend("boom".to_string()))
        })
        .await;

        assert!(result.is_err());
        // No unbalanced entries after the failure
        assert!(history(&backend, "op").await.unwrap().is_empty());
        assert!(backend.lrange(&inputs_key("op"), 0, -1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_preserves_invocation_order() {
        let backend = MemoryBackend::new();

        for i in 0..3 {
            let args = format!("({})", i);
            call_history(&backend, "op", &args, || async move { Ok(i * 10) })
                .await
                .unwrap();
        }

        let calls = history(&backend, "op").await.unwrap();
        assert_eq!(
            calls,
            vec![
                ("(0)".to_string(), "0".to_string()),
                ("(1)".to_string(), "10".to_string()),
                ("(2)".to_string(), "20".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_operations_do_not_collide() {
        let backend = MemoryBackend::new();

        count_calls(&backend, "first", || async { Ok(()) }).await.unwrap();
        count_calls(&backend, "first", || async { Ok(()) }).await.unwrap();
        count_calls(&backend, "second", || async { Ok(()) }).await.unwrap();

        assert_eq!(call_count(&backend, "first").await.unwrap(), 2);
        assert_eq!(call_count(&backend, "second").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_call_count_never_invoked() {
        let backend = MemoryBackend::new();
        assert_eq!(call_count(&backend, "never").await.unwrap(), 0);
    }
}
