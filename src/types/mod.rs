//! Core types shared across the crate.
//!
//! - **Errors**: conversion error types with thiserror derives
//! - **Config**: deserializer configuration

mod config;
mod errors;

pub use config::{DeserializerConfig, ENV_DENY_UNKNOWN_FIELDS, ENV_MAX_DEPTH};
pub use errors::{Error, Result};
