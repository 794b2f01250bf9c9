//! Structural deserializer.
//!
//! Converts a [`Mapping`] into an instance of a described type with a single
//! depth-first walk:
//!
//! ```text
//!   convert(mapping, T)
//!     ├─ empty/absent mapping ─────────────→ no value
//!     ├─ construct default T
//!     └─ for each (key, value)
//!          ├─ value is a sequence ──→ sequence field rule ─┐
//!          └─ otherwise ────────────→ scalar/nested rule ──┤
//!                                                          └─ nested mappings recurse into convert
//! ```
//!
//! The deserializer holds only immutable configuration and may be shared
//! freely between threads.

use serde_json::Value;

use crate::reflect::{
    downcast, Describe, ElementType, FieldInfo, FieldType, FieldValue, Reflect, SetFieldError,
    TypeInfo,
};
use crate::types::{DeserializerConfig, Error, Result};
use crate::value::{Mapping, ValueKind};

/// Field name reported for errors about the top-level value itself.
pub const ROOT_FIELD: &str = "<root>";

/// Recursive mapping-to-struct converter.
#[derive(Debug, Clone, Default)]
pub struct StructuralDeserializer {
    config: DeserializerConfig,
}

impl StructuralDeserializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DeserializerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeserializerConfig {
        &self.config
    }

    /// Convert `mapping` into a fresh instance of `target`.
    ///
    /// Returns `Ok(None)` when the mapping is absent or empty. Any failure
    /// aborts the whole conversion and no instance is returned.
    pub fn convert(
        &self,
        mapping: Option<&Mapping>,
        target: &'static TypeInfo,
    ) -> Result<Option<Box<dyn Reflect>>> {
        let result = self.convert_at(mapping, target, 1);
        if let Err(e) = &result {
            tracing::debug!("conversion_failed: type={}, error={}", target.name, e);
        }
        result
    }

    /// Typed form of [`convert`](Self::convert).
    pub fn convert_map<T: Describe>(&self, mapping: Option<&Mapping>) -> Result<Option<T>> {
        self.convert(mapping, T::describe())?
            .map(|instance| {
                downcast::<T>(instance)
                    .map_err(|e| Error::type_mismatch(T::describe().name, ROOT_FIELD, e.to_string()))
            })
            .transpose()
    }

    /// Convert an arbitrary source value. `null` is no value; anything other
    /// than a mapping is a type mismatch.
    pub fn convert_value<T: Describe>(&self, value: &Value) -> Result<Option<T>> {
        match value {
            Value::Null => Ok(None),
            Value::Object(mapping) => self.convert_map(Some(mapping)),
            other => Err(Error::type_mismatch(
                T::describe().name,
                ROOT_FIELD,
                format!("expected a mapping, got a {}", ValueKind::of(other)),
            )),
        }
    }

    /// Parse JSON text and convert the resulting value.
    pub fn convert_json_str<T: Describe>(&self, s: &str) -> Result<Option<T>> {
        let value: Value = serde_json::from_str(s)?;
        self.convert_value(&value)
    }

    /// Parse JSON bytes and convert the resulting value.
    pub fn convert_json_slice<T: Describe>(&self, bytes: &[u8]) -> Result<Option<T>> {
        let value: Value = serde_json::from_slice(bytes)?;
        self.convert_value(&value)
    }

    fn convert_at(
        &self,
        mapping: Option<&Mapping>,
        target: &'static TypeInfo,
        depth: usize,
    ) -> Result<Option<Box<dyn Reflect>>> {
        let mapping = match mapping {
            Some(m) if !m.is_empty() => m,
            _ => return Ok(None),
        };
        if depth > self.config.max_depth {
            return Err(Error::depth_limit_exceeded(target.name, self.config.max_depth));
        }

        let mut instance = target.construct_default()?;
        for (key, value) in mapping {
            let Some(field) = target.field(key) else {
                if self.config.deny_unknown_fields {
                    return Err(Error::unknown_field(target.name, key.as_str()));
                }
                tracing::debug!("unknown_field_skipped: type={}, field={}", target.name, key);
                continue;
            };

            tracing::trace!(
                "field_dispatch: type={}, field={}, value={}, depth={}",
                target.name,
                field.name,
                ValueKind::of(value),
                depth
            );

            match value {
                Value::Array(items) => {
                    self.handle_sequence_field(instance.as_mut(), target, field, items, depth)?
                }
                other => {
                    self.handle_scalar_or_nested_field(instance.as_mut(), target, field, other, depth)?
                }
            }
        }
        Ok(Some(instance))
    }

    fn handle_sequence_field(
        &self,
        instance: &mut dyn Reflect,
        owner: &'static TypeInfo,
        field: &FieldInfo,
        items: &[Value],
        depth: usize,
    ) -> Result<()> {
        let FieldType::Sequence(element) = field.ty else {
            return Err(Error::malformed_field_type(
                owner.name,
                field.name,
                field.ty.to_string(),
            ));
        };

        let elements = items
            .iter()
            .map(|item| -> Result<FieldValue> {
                match (element, item) {
                    (ElementType::Struct(ty), Value::Object(nested)) => Ok(FieldValue::Struct(
                        self.convert_at(Some(nested), ty.get(), depth + 1)?,
                    )),
                    // Scalars, and mappings bound for scalar elements, pass through untouched.
                    _ => Ok(FieldValue::Scalar(item.clone())),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        assign(instance, owner, field, FieldValue::Sequence(elements))
    }

    fn handle_scalar_or_nested_field(
        &self,
        instance: &mut dyn Reflect,
        owner: &'static TypeInfo,
        field: &FieldInfo,
        value: &Value,
        depth: usize,
    ) -> Result<()> {
        match (field.ty.nested_type(), value) {
            (Some(nested_ty), Value::Object(nested)) => {
                let converted = self.convert_at(Some(nested), nested_ty, depth + 1)?;
                assign(instance, owner, field, FieldValue::Struct(converted))
            }
            _ => assign(instance, owner, field, FieldValue::Scalar(value.clone())),
        }
    }
}

fn assign(
    instance: &mut dyn Reflect,
    owner: &'static TypeInfo,
    field: &FieldInfo,
    value: FieldValue,
) -> Result<()> {
    instance.set_field(field.name, value).map_err(|e| match e {
        SetFieldError::NoSuchField => Error::unknown_field(owner.name, field.name),
        SetFieldError::Mismatch(reason) => Error::type_mismatch(owner.name, field.name, reason),
    })
}

/// Convert a mapping with the default configuration.
pub fn from_map<T: Describe>(mapping: Option<&Mapping>) -> Result<Option<T>> {
    StructuralDeserializer::default().convert_map(mapping)
}

/// Convert a source value with the default configuration.
pub fn from_value<T: Describe>(value: &Value) -> Result<Option<T>> {
    StructuralDeserializer::default().convert_value(value)
}

/// Parse and convert JSON text with the default configuration.
pub fn from_json_str<T: Describe>(s: &str) -> Result<Option<T>> {
    StructuralDeserializer::default().convert_json_str(s)
}

/// Parse and convert JSON bytes with the default configuration.
pub fn from_json_slice<T: Describe>(bytes: &[u8]) -> Result<Option<T>> {
    StructuralDeserializer::default().convert_json_slice(bytes)
}
