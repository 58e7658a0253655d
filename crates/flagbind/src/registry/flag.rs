//! A single registry entry.

use serde::Serialize;

use crate::value::{FieldType, Value};

/// A named, typed value with a fixed default and a possibly overridden current value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flag {
    name: String,
    ty: FieldType,
    default: Value,
    current: Value,
    help: String,
}

impl Flag {
    pub(crate) fn new(name: String, ty: FieldType, default: Value, help: String) -> Self {
        Self {
            name,
            ty,
            current: default.clone(),
            default,
            help,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.ty
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn current_value(&self) -> &Value {
        &self.current
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Whether an override has moved the current value away from the default.
    pub fn is_overridden(&self) -> bool {
        self.current != self.default
    }

    pub(crate) fn set_current(&mut self, value: Value) {
        self.current = value;
    }

    pub(crate) fn reset(&mut self) {
        self.current = self.default.clone();
    }
}
