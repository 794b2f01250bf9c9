//! # structmap - reflection-driven struct population
//!
//! Converts string-keyed mappings (typically parsed from JSON or another
//! wire format) into instances of Rust structs:
//! - Nested mappings become nested structs
//! - Sequences of mappings become `Vec`s of structs, in source order
//! - Scalars are assigned unconverted through `serde`
//!
//! ## Architecture
//!
//! ```text
//!   Mapping ──→ StructuralDeserializer ──→ Box<dyn Reflect> ──→ T
//!                        │
//!                        └── TypeInfo tables (describe!)
//!                              name, default constructor,
//!                              declared field types
//! ```
//!
//! Target types opt in with the [`describe!`] macro, which generates a static
//! field table and dynamic field setters. An empty or absent mapping yields
//! no value rather than a default instance.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod deserializer;
pub mod reflect;
pub mod types;
pub mod value;

// Internal utilities
pub mod observability;

pub use deserializer::{from_json_slice, from_json_str, from_map, from_value, StructuralDeserializer};
pub use reflect::{Describe, Reflect, TypeInfo};
pub use types::{DeserializerConfig, Error, Result};
pub use value::Mapping;
