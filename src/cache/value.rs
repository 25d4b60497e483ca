//! Value Module
//!
//! Typed scalar values accepted by the instrumented store: text, raw bytes,
//! integers, and floats. Values are encoded to raw bytes on write, the same
//! representation the backing store would hold natively.

use std::fmt;

// == Value ==
/// A scalar value accepted by [`Cache::store`](crate::cache::Cache::store).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text
    Text(String),
    /// Raw binary data
    Bytes(Vec<u8>),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
}

impl Value {
    /// Encodes the value into the raw bytes written to the backing store.
    ///
    /// Numbers are stored as their decimal text, matching how a Redis client
    /// would transmit them; `fetch_int` parses that text back.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Value::Text(s) => s.into_bytes(),
            Value::Bytes(b) => b,
            Value::Int(i) => i.to_string().into_bytes(),
            Value::Float(f) => f.to_string().into_bytes(),
        }
    }
}

// == Display ==
/// Renders the value the way it appears in call-history argument tuples:
/// text quoted, bytes as a byte-string literal, numbers plain.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
        }
    }
}

// == Conversions ==
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_bytes_text() {
        assert_eq!(Value::from("hello").into_bytes(), b"hello".to_vec());
    }

    #[test]
    fn test_into_bytes_bytes_identity() {
        let data = vec![0u8, 159, 146, 150];
        assert_eq!(Value::from(data.clone()).into_bytes(), data);
    }

    #[test]
    fn test_into_bytes_numbers() {
        assert_eq!(Value::from(42i64).into_bytes(), b"42".to_vec());
        assert_eq!(Value::from(-7i64).into_bytes(), b"-7".to_vec());
        assert_eq!(Value::from(1.5f64).into_bytes(), b"1.5".to_vec());
    }

    #[test]
    fn test_display_text_quoted() {
        assert_eq!(Value::from("hello").to_string(), "\"hello\"");
    }

    #[test]
    fn test_display_bytes_literal() {
        assert_eq!(Value::from(b"ab".as_slice()).to_string(), "b\"ab\"");
    }

    #[test]
    fn test_display_numbers_plain() {
        assert_eq!(Value::from(42i64).to_string(), "42");
        assert_eq!(Value::from(1.5f64).to_string(), "1.5");
    }
}
