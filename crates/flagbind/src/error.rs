//! Error types for schema declaration, flag binding, and record construction.
//!
//! Responsibilities:
//! - Define error variants raised while freezing a schema (`SchemaError`).
//! - Define error variants raised while binding fields to flags (`BindError`).
//! - Define error variants raised while building or mutating records (`RecordError`).
//!
//! Does NOT handle:
//! - Registry-level failures (see `registry::RegistryError`).
//!
//! Invariants:
//! - Every variant names the schema and field involved.
//! - Synchronization by field name never produces an error; only linked
//!   synchronization can fail, and only on an unresolved flag name.

use thiserror::Error;

use crate::registry::RegistryError;
use crate::value::{FieldType, Value};

/// Errors raised while declaring a schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Schema '{schema}' declares field '{field}' more than once (including inherited fields)")]
    DuplicateField { schema: String, field: String },

    #[error("Default {default} of field '{schema}.{field}' does not match declared type {expected}")]
    DefaultTypeMismatch {
        schema: String,
        field: String,
        expected: FieldType,
        default: Value,
    },

    #[error("Schema '{schema}' links unknown field '{field}' to flag '{flag}'")]
    UnknownLinkedField {
        schema: String,
        field: String,
        flag: String,
    },

    #[error("Failed to bind flags for schema '{schema}': {source}")]
    Bind {
        schema: String,
        #[source]
        source: BindError,
    },
}

/// Errors raised while registering schema fields as flags.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    #[error("Field '{schema}.{field}' has type {ty}, which cannot be registered as a flag")]
    UnsupportedType {
        schema: String,
        field: String,
        ty: FieldType,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised while building or updating a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Schema '{schema}' has no field '{field}'")]
    UnknownField { schema: String, field: String },

    #[error("Value {value} does not match type {expected} of field '{schema}.{field}'")]
    TypeMismatch {
        schema: String,
        field: String,
        expected: FieldType,
        value: Value,
    },

    #[error("Field '{schema}.{field}' is linked to flag '{flag}', which is not registered")]
    UnresolvedFlag {
        schema: String,
        field: String,
        flag: String,
    },
}
