//! Payload type for caches holding mixed values.

use std::fmt;

use serde::Serialize;

/// A dynamically typed cache payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Value {
    Int(i64),
    Text(String),
    /// Raw bytes, e.g. a fetched page body
    Bytes(Vec<u8>),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(12341234i64).as_int(), Some(12341234));
        assert_eq!(Value::from("hello").as_text(), Some("hello"));
        assert_eq!(Value::from(vec![1u8, 2, 3]).as_bytes(), Some(&[1u8, 2, 3][..]));
        assert_eq!(Value::from("hello").as_int(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(Value::Bytes(vec![0; 10]).to_string(), "<10 bytes>");
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(Value::Int(3)).unwrap();
        assert_eq!(json["type"], "int");
        assert_eq!(json["data"], 3);
    }
}
