//! Field slot conversions used by generated setters.
//!
//! Each helper turns a [`FieldValue`] into the concrete Rust type of a field,
//! or reports why it cannot. Scalars go through `serde_json` unchanged, so a
//! string never becomes a number here.

use serde::de::DeserializeOwned;

use super::{downcast, Describe, FieldValue, SetFieldError, TypeInfo};

type SlotResult<T> = std::result::Result<T, SetFieldError>;

/// Store a raw scalar in a field of type `T`.
pub fn assign_scalar<T: DeserializeOwned>(value: FieldValue) -> SlotResult<T> {
    match value {
        FieldValue::Scalar(raw) => {
            serde_json::from_value(raw).map_err(|e| SetFieldError::mismatch(e.to_string()))
        }
        other => Err(SetFieldError::mismatch(format!(
            "expected a scalar, got a {}",
            other.kind_name()
        ))),
    }
}

/// Store a structured value in a non-optional field.
///
/// No value resets the field to `T::default()`.
pub fn assign_struct<T: Describe>(value: FieldValue) -> SlotResult<T> {
    match value {
        FieldValue::Struct(Some(instance)) => downcast(instance),
        FieldValue::Struct(None) => Ok(T::default()),
        other => Err(SetFieldError::mismatch(format!(
            "expected a mapping for `{}`, got a {}",
            T::describe().name,
            other.kind_name()
        ))),
    }
}

/// Store a structured value, no value, or `null` in an optional field.
pub fn assign_optional<T: Describe>(value: FieldValue) -> SlotResult<Option<T>> {
    match value {
        FieldValue::Struct(Some(instance)) => downcast(instance).map(Some),
        FieldValue::Struct(None) | FieldValue::Scalar(serde_json::Value::Null) => Ok(None),
        other => Err(SetFieldError::mismatch(format!(
            "expected a mapping or null for `{}`, got a {}",
            T::describe().name,
            other.kind_name()
        ))),
    }
}

/// Store a sequence of raw scalars.
pub fn assign_scalar_list<T: DeserializeOwned>(value: FieldValue) -> SlotResult<Vec<T>> {
    elements(value)?
        .into_iter()
        .enumerate()
        .map(|(i, element)| assign_scalar(element).map_err(|e| at_index(i, e)))
        .collect()
}

/// Store a sequence of structured values.
pub fn assign_struct_list<T: Describe>(value: FieldValue) -> SlotResult<Vec<T>> {
    elements(value)?
        .into_iter()
        .enumerate()
        .map(|(i, element)| assign_struct(element).map_err(|e| at_index(i, e)))
        .collect()
}

fn elements(value: FieldValue) -> SlotResult<Vec<FieldValue>> {
    match value {
        FieldValue::Sequence(items) => Ok(items),
        other => Err(SetFieldError::mismatch(format!(
            "expected a sequence, got a {}",
            other.kind_name()
        ))),
    }
}

fn at_index(index: usize, err: SetFieldError) -> SetFieldError {
    SetFieldError::mismatch(format!("element {}: {}", index, err))
}

/// `Option<T>` fields holding a described type.
pub trait OptionalSlot: Sized {
    fn element() -> &'static TypeInfo;
    fn assign(value: FieldValue) -> SlotResult<Self>;
}

impl<T: Describe> OptionalSlot for Option<T> {
    fn element() -> &'static TypeInfo {
        T::describe()
    }

    fn assign(value: FieldValue) -> SlotResult<Self> {
        assign_optional(value)
    }
}

/// `Vec<T>` fields holding serde-deserializable scalars.
pub trait ScalarListSlot: Sized {
    fn assign(value: FieldValue) -> SlotResult<Self>;
}

impl<T: DeserializeOwned> ScalarListSlot for Vec<T> {
    fn assign(value: FieldValue) -> SlotResult<Self> {
        assign_scalar_list(value)
    }
}

/// `Vec<T>` fields holding a described type.
pub trait StructListSlot: Sized {
    fn element() -> &'static TypeInfo;
    fn assign(value: FieldValue) -> SlotResult<Self>;
}

impl<T: Describe> StructListSlot for Vec<T> {
    fn element() -> &'static TypeInfo {
        T::describe()
    }

    fn assign(value: FieldValue) -> SlotResult<Self> {
        assign_struct_list(value)
    }
}
