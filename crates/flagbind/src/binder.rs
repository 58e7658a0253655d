//! Registration of schema fields as registry flags.
//!
//! Responsibilities:
//! - Select the fields in scope (own or flattened) minus `skip_flags`.
//! - Register each as a flag with the field's type, default, and help text.
//! - Report which flags were created and which already existed.
//!
//! Does NOT handle:
//! - Reading or applying overrides (see `registry` and `sync`).
//!
//! Invariants:
//! - Re-binding a schema with identical options is a no-op.
//! - A failed bind registers nothing: unsupported types and conflicts are
//!   found before the first flag is written.
//! - Skipped fields stay on the schema; they just never reach the registry.

use std::collections::BTreeSet;

use crate::error::BindError;
use crate::help::extract_help_info;
use crate::registry::{FlagRegistry, Registration};
use crate::schema::{FieldDescriptor, RecordSchema};

/// Options controlling which fields of a schema become flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindOptions {
    /// Field names that must not be registered.
    pub skip_flags: BTreeSet<String>,
    /// Include inherited fields (and inherited help text).
    pub is_nested: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            skip_flags: BTreeSet::new(),
            is_nested: true,
        }
    }
}

impl BindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_flags.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn nested(mut self, is_nested: bool) -> Self {
        self.is_nested = is_nested;
        self
    }
}

/// What a `bind` call did to the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    pub registered: Vec<String>,
    pub already_present: Vec<String>,
    pub skipped: Vec<String>,
}

/// Registers schema fields into a `FlagRegistry`.
#[derive(Debug, Clone, Default)]
pub struct FlagBinder {
    options: BindOptions,
}

impl FlagBinder {
    pub fn new(options: BindOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BindOptions {
        &self.options
    }

    fn fields_in_scope<'a>(
        &self,
        schema: &'a RecordSchema,
    ) -> Box<dyn Iterator<Item = &'a FieldDescriptor> + 'a> {
        if self.options.is_nested {
            Box::new(schema.fields())
        } else {
            Box::new(schema.own_fields().iter())
        }
    }

    /// Register the in-scope fields of `schema` as flags.
    ///
    /// # Errors
    ///
    /// - `BindError::UnsupportedType` if an in-scope field cannot be a flag.
    /// - `BindError::Registry` if a flag of the same name exists with a
    ///   different type or default.
    pub fn bind(
        &self,
        schema: &RecordSchema,
        registry: &mut FlagRegistry,
    ) -> Result<BindReport, BindError> {
        let mut report = BindReport::default();
        let mut targets = Vec::new();

        for field in self.fields_in_scope(schema) {
            if self.options.skip_flags.contains(field.name()) {
                report.skipped.push(field.name().to_string());
                continue;
            }
            if !field.field_type().is_flaggable() {
                return Err(BindError::UnsupportedType {
                    schema: schema.name().to_string(),
                    field: field.name().to_string(),
                    ty: field.field_type(),
                });
            }
            targets.push(field);
        }

        for field in &targets {
            registry.check_register(field.name(), field.field_type(), field.default_value())?;
        }

        let help = extract_help_info(schema, self.options.is_nested);
        for field in targets {
            let text = help.get(field.name()).map_or("", String::as_str);
            match registry.register(
                field.name(),
                field.field_type(),
                field.default_value().clone(),
                text,
            )? {
                Registration::Created => report.registered.push(field.name().to_string()),
                Registration::AlreadyPresent => {
                    report.already_present.push(field.name().to_string())
                }
            }
        }

        tracing::debug!(
            schema = %schema.name(),
            registered = report.registered.len(),
            already_present = report.already_present.len(),
            skipped = report.skipped.len(),
            "bound schema fields to flags"
        );
        Ok(report)
    }
}
