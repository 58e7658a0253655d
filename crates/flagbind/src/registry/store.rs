//! The flag registry store.
//!
//! Responsibilities:
//! - Hold flags keyed by name.
//! - Register flags idempotently and reject conflicting re-registration.
//! - Apply and reset overrides of current values.
//! - Render a usage listing of all registered flags.
//!
//! Does NOT handle:
//! - Reading overrides from the environment (see `env.rs`).
//! - Mapping record fields to flags (see `binder` and `link`).
//!
//! Invariants:
//! - A registered flag keeps its type and default for the registry's lifetime.
//! - Current values always match the flag's declared type.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::error::RegistryError;
use super::flag::Flag;
use crate::value::{FieldType, Value};

/// Outcome of a successful `register` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Created,
    /// An identical flag was already registered; nothing changed.
    AlreadyPresent,
}

/// Named, typed values with defaults and overridable current values.
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    flags: BTreeMap<String, Flag>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flag.
    ///
    /// Registering a name that already exists with the same type and default
    /// is a no-op. A different type or default is a `Conflict`.
    pub fn register(
        &mut self,
        name: &str,
        ty: FieldType,
        default: Value,
        help: &str,
    ) -> Result<Registration, RegistryError> {
        if self.check_register(name, ty, &default)? == Registration::AlreadyPresent {
            tracing::trace!(flag = %name, "flag already registered");
            return Ok(Registration::AlreadyPresent);
        }

        tracing::debug!(flag = %name, ty = %ty, default = %default, "registered flag");
        self.flags.insert(
            name.to_string(),
            Flag::new(name.to_string(), ty, default, help.to_string()),
        );
        Ok(Registration::Created)
    }

    /// What `register` would do with these arguments, without changing anything.
    pub(crate) fn check_register(
        &self,
        name: &str,
        ty: FieldType,
        default: &Value,
    ) -> Result<Registration, RegistryError> {
        if !default.matches(ty) {
            return Err(RegistryError::TypeMismatch {
                name: name.to_string(),
                expected: ty,
                value: default.clone(),
            });
        }

        let Some(existing) = self.flags.get(name) else {
            return Ok(Registration::Created);
        };
        if existing.field_type() == ty && existing.default_value() == default {
            return Ok(Registration::AlreadyPresent);
        }
        Err(RegistryError::Conflict {
            name: name.to_string(),
            existing_type: existing.field_type(),
            existing_default: existing.default_value().clone(),
            requested_type: ty,
            requested_default: default.clone(),
        })
    }

    pub fn has(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    pub fn get_current_value(&self, name: &str) -> Option<&Value> {
        self.flags.get(name).map(Flag::current_value)
    }

    pub fn get_default_value(&self, name: &str) -> Option<&Value> {
        self.flags.get(name).map(Flag::default_value)
    }

    /// Whether the named flag exists and its current value differs from its default.
    pub fn is_overridden(&self, name: &str) -> bool {
        self.flags.get(name).is_some_and(Flag::is_overridden)
    }

    /// Override the current value of a flag.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), RegistryError> {
        let value = value.into();
        let flag = self
            .flags
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownFlag(name.to_string()))?;
        if !value.matches(flag.field_type()) {
            return Err(RegistryError::TypeMismatch {
                name: name.to_string(),
                expected: flag.field_type(),
                value,
            });
        }
        tracing::debug!(flag = %name, value = %value, "flag overridden");
        flag.set_current(value);
        Ok(())
    }

    /// Override the current value of a flag from its string form.
    pub fn set_from_str(&mut self, name: &str, raw: &str) -> Result<(), RegistryError> {
        let ty = self
            .flags
            .get(name)
            .map(Flag::field_type)
            .ok_or_else(|| RegistryError::UnknownFlag(name.to_string()))?;
        let value = ty.parse(raw).map_err(|message| RegistryError::InvalidValue {
            name: name.to_string(),
            message,
        })?;
        self.set(name, value)
    }

    /// Restore a flag's current value to its default.
    pub fn reset(&mut self, name: &str) -> Result<(), RegistryError> {
        self.flags
            .get_mut(name)
            .map(Flag::reset)
            .ok_or_else(|| RegistryError::UnknownFlag(name.to_string()))
    }

    /// Restore every flag's current value to its default.
    pub fn reset_all(&mut self) {
        self.flags.values_mut().for_each(Flag::reset);
    }

    /// Iterate flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Render a human-readable listing of every flag.
    ///
    /// ```text
    /// --batch_size: rows per batch
    ///     (default: 32)
    /// ```
    pub fn usage(&self) -> String {
        let mut out = String::new();
        for flag in self.flags.values() {
            if flag.help().is_empty() {
                let _ = writeln!(out, "--{}", flag.name());
            } else {
                let _ = writeln!(out, "--{}: {}", flag.name(), flag.help());
            }
            if flag.is_overridden() {
                let _ = writeln!(
                    out,
                    "    (default: {}, current: {})",
                    flag.default_value(),
                    flag.current_value()
                );
            } else {
                let _ = writeln!(out, "    (default: {})", flag.default_value());
            }
        }
        out
    }
}
