//! Cache Module
//!
//! Instrumented key-value storage: random-identifier value storage with a
//! persisted invocation counter and call history for the store operation.

pub mod instrument;
mod store;
mod value;


// Re-export public types
pub use store::{Cache, STORE_OP};
pub use value::Value;
