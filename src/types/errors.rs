//! Conversion error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and carry
//! the type and field names reported by the reflection tables.

use thiserror::Error;

/// Conversion result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for structural conversion.
///
/// Every variant aborts the whole conversion; no partially populated
/// instance is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum Error {
    /// A mapping key has no corresponding field on the target type.
    #[error("unknown field `{field}` on type `{type_name}`")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    /// The target type cannot be default-constructed.
    #[error("type `{type_name}` cannot be default-constructed")]
    Construction { type_name: &'static str },

    /// A sequence value targets a field that is not declared as a sequence.
    #[error("field `{field}` on type `{type_name}` is declared as {declared}, not a sequence")]
    MalformedFieldType {
        type_name: &'static str,
        field: String,
        declared: String,
    },

    /// The field setter rejected the value.
    #[error("type mismatch for field `{field}` on type `{type_name}`: {reason}")]
    TypeMismatch {
        type_name: &'static str,
        field: String,
        reason: String,
    },

    /// Nesting went deeper than the configured limit.
    #[error("nesting depth limit of {limit} exceeded while converting `{type_name}`")]
    DepthLimitExceeded { type_name: &'static str, limit: usize },

    /// Invalid configuration value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors from the wire format.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Convenience constructors
impl Error {
    pub fn unknown_field(type_name: &'static str, field: impl Into<String>) -> Self {
        Self::UnknownField {
            type_name,
            field: field.into(),
        }
    }

    pub fn construction(type_name: &'static str) -> Self {
        Self::Construction { type_name }
    }

    pub fn malformed_field_type(
        type_name: &'static str,
        field: impl Into<String>,
        declared: impl Into<String>,
    ) -> Self {
        Self::MalformedFieldType {
            type_name,
            field: field.into(),
            declared: declared.into(),
        }
    }

    pub fn type_mismatch(
        type_name: &'static str,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            type_name,
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn depth_limit_exceeded(type_name: &'static str, limit: usize) -> Self {
        Self::DepthLimitExceeded { type_name, limit }
    }

    /// Name of the field the error is attached to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::UnknownField { field, .. }
            | Error::MalformedFieldType { field, .. }
            | Error::TypeMismatch { field, .. } => Some(field),
            Error::Construction { .. }
            | Error::DepthLimitExceeded { .. }
            | Error::Validation(_)
            | Error::Serialization(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_type_and_field() {
        let err = Error::unknown_field("Order", "bogus");
        insta::assert_snapshot!(err.to_string(), @"unknown field `bogus` on type `Order`");

        let err = Error::malformed_field_type("Order", "customer", "struct `Customer`");
        insta::assert_snapshot!(
            err.to_string(),
            @"field `customer` on type `Order` is declared as struct `Customer`, not a sequence"
        );
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(Error::type_mismatch("A", "x", "bad").field(), Some("x"));
        assert_eq!(Error::construction("A").field(), None);
        assert_eq!(Error::depth_limit_exceeded("A", 4).field(), None);
    }
}
