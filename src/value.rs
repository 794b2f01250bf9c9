//! Source mappings.
//!
//! A source mapping is the in-memory result of parsing some wire format:
//! string keys mapped to scalars, nested mappings, or ordered sequences.
//! `serde_json`'s object model is used as the representation.

use serde_json::Value;
use std::fmt;

/// String-keyed source mapping.
pub type Mapping = serde_json::Map<String, Value>;

/// Shape of a raw source value, as far as dispatch is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Mapping,
    Sequence,
    Scalar,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueKind::Mapping,
            Value::Array(_) => ValueKind::Sequence,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => ValueKind::Scalar,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Mapping => write!(f, "mapping"),
            ValueKind::Sequence => write!(f, "sequence"),
            ValueKind::Scalar => write!(f, "scalar"),
        }
    }
}
