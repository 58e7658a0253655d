//! Error types for the flag registry.
//!
//! Responsibilities:
//! - Define error variants for registration, override, and dotenv failures.
//!
//! Does NOT handle:
//! - Binder-level failures such as unsupported field types (see `binder`).
//!
//! Invariants:
//! - All error variants include the flag name when one is involved.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

use crate::value::{FieldType, Value};

/// Errors that can occur while registering or overriding flags.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// A flag with this name already exists with a different type or default.
    #[error(
        "Flag '{name}' is already registered as {existing_type} (default {existing_default}), \
         cannot re-register as {requested_type} (default {requested_default})"
    )]
    Conflict {
        name: String,
        existing_type: FieldType,
        existing_default: Value,
        requested_type: FieldType,
        requested_default: Value,
    },

    #[error("Value {value} does not match type {expected} of flag '{name}'")]
    TypeMismatch {
        name: String,
        expected: FieldType,
        value: Value,
    },

    #[error("Unknown flag: {0}")]
    UnknownFlag(String),

    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: only the byte index of the failure is kept, never the line.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set FLAGBIND_DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    #[error("Failed to load .env file. Hint: set FLAGBIND_DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
