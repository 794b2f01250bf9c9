//! Type reflection facility.
//!
//! Target types describe themselves through a static [`TypeInfo`] table
//! (name, default constructor, declared field types) and expose dynamic
//! field access through the [`Reflect`] trait. Tables are normally generated
//! by the [`describe!`](crate::describe) macro, but can be written by hand.
//!
//! Nested and element types are always taken from the declared field type,
//! never from the value currently held in the field.

use serde_json::Value;
use std::any::Any;
use std::fmt;
use thiserror::Error;

use crate::types::{Error, Result};
use crate::value::ValueKind;

mod macros;
mod slots;

pub use slots::{
    assign_optional, assign_scalar, assign_scalar_list, assign_struct, assign_struct_list,
    OptionalSlot, ScalarListSlot, StructListSlot,
};

/// Lazy reference to a [`TypeInfo`] via a function pointer.
///
/// Resolution is deferred so that self-referential types can be described.
#[derive(Clone, Copy)]
pub struct TypeRef(pub fn() -> &'static TypeInfo);

impl TypeRef {
    #[inline]
    pub fn get(&self) -> &'static TypeInfo {
        (self.0)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Name only; a full dump would recurse for self-referential types.
        write!(f, "TypeRef({})", self.get().name)
    }
}

/// Declared element type of a sequence field.
#[derive(Debug, Clone, Copy)]
pub enum ElementType {
    /// Elements are stored as-is through serde.
    Scalar,
    /// Elements are structured values of the referenced type.
    Struct(TypeRef),
}

/// Declared type of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    /// Leaf value assigned through serde (numbers, strings, maps of scalars, ...).
    Scalar { type_name: &'static str },
    /// Structured value stored inline.
    Struct(TypeRef),
    /// Structured value that may hold no value.
    Optional(TypeRef),
    /// Ordered sequence with a single element type parameter.
    Sequence(ElementType),
}

impl FieldType {
    /// The structured type behind a `Struct` or `Optional` field.
    pub fn nested_type(&self) -> Option<&'static TypeInfo> {
        match self {
            FieldType::Struct(ty) | FieldType::Optional(ty) => Some(ty.get()),
            FieldType::Scalar { .. } | FieldType::Sequence(_) => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar { type_name } => write!(f, "scalar `{}`", type_name),
            FieldType::Struct(ty) => write!(f, "struct `{}`", ty.get().name),
            FieldType::Optional(ty) => write!(f, "optional `{}`", ty.get().name),
            FieldType::Sequence(ElementType::Scalar) => write!(f, "sequence of scalars"),
            FieldType::Sequence(ElementType::Struct(ty)) => {
                write!(f, "sequence of `{}`", ty.get().name)
            }
        }
    }
}

/// A named field and its declared type.
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    pub name: &'static str,
    pub ty: FieldType,
}

/// Descriptor of a constructible structured type.
#[derive(Debug)]
pub struct TypeInfo {
    pub name: &'static str,

    /// Default constructor; `None` if the type cannot be default-constructed.
    pub construct: Option<fn() -> Box<dyn Reflect>>,

    pub fields: &'static [FieldInfo],
}

impl TypeInfo {
    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Build a fresh default instance of this type.
    pub fn construct_default(&self) -> Result<Box<dyn Reflect>> {
        let construct = self.construct.ok_or_else(|| Error::construction(self.name))?;
        Ok(construct())
    }
}

/// Value handed to [`Reflect::set_field`].
#[derive(Debug)]
pub enum FieldValue {
    /// Raw source value, unconverted.
    Scalar(Value),
    /// Converted structured value, or no value.
    Struct(Option<Box<dyn Reflect>>),
    /// Converted sequence elements, in source order.
    Sequence(Vec<FieldValue>),
}

impl FieldValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Scalar(raw) => match ValueKind::of(raw) {
                ValueKind::Mapping => "mapping",
                ValueKind::Sequence => "sequence",
                ValueKind::Scalar => "scalar",
            },
            FieldValue::Struct(_) => "structured value",
            FieldValue::Sequence(_) => "sequence",
        }
    }
}

/// Failure reported by a field setter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetFieldError {
    #[error("no such field")]
    NoSuchField,

    #[error("{0}")]
    Mismatch(String),
}

impl SetFieldError {
    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self::Mismatch(reason.into())
    }
}

/// Dynamic access to a structured instance.
pub trait Reflect: Any + fmt::Debug + Send {
    /// Runtime type of this instance.
    fn type_info(&self) -> &'static TypeInfo;

    /// Read a field by name.
    fn field_ref(&self, name: &str) -> Option<&dyn Any>;

    /// Replace a field's value.
    fn set_field(&mut self, name: &str, value: FieldValue) -> std::result::Result<(), SetFieldError>;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Static description of a concrete, default-constructible type.
pub trait Describe: Reflect + Default + Sized {
    fn describe() -> &'static TypeInfo;
}

/// Default constructor usable as [`TypeInfo::construct`].
pub fn construct_default<T: Describe>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

/// Recover a concrete value from a reflected instance.
pub fn downcast<T: Describe>(instance: Box<dyn Reflect>) -> std::result::Result<T, SetFieldError> {
    let actual = instance.type_info().name;
    instance
        .into_any()
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| {
            SetFieldError::mismatch(format!(
                "expected `{}`, got `{}`",
                T::describe().name,
                actual
            ))
        })
}
