//! Schema builder implementation.
//!
//! Responsibilities:
//! - Accumulate fields, documentation, link spec, flag binding, and the
//!   sync-on-construct switch for one schema.
//! - Flatten inherited fields and resolve the applicable link spec on `build()`.
//! - Register flags on `finalize()` when a flag binding was requested.
//!
//! Does NOT handle:
//! - The registration algorithm itself (delegated to `FlagBinder`).
//! - Building record instances (see `record`).
//!
//! Invariants / Assumptions:
//! - The order of builder calls never changes the result.
//! - A field default must match its declared type.
//! - Linked fields must exist in the flattened field table; linked flag
//!   names are only checked when a record is synchronized.

use indexmap::IndexMap;
use std::sync::Arc;

use super::{FieldDescriptor, RecordSchema};
use crate::binder::{BindOptions, FlagBinder};
use crate::error::SchemaError;
use crate::help::own_help;
use crate::link::LinkSpec;
use crate::registry::FlagRegistry;
use crate::value::{FieldType, Value};

/// Builder for a `RecordSchema`.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    parent: Option<Arc<RecordSchema>>,
    fields: Vec<FieldDescriptor>,
    doc: Option<String>,
    link_spec: Option<LinkSpec>,
    flag_binding: Option<BindOptions>,
    sync_on_construct: bool,
}

impl SchemaBuilder {
    /// Create a builder for a schema named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
            doc: None,
            link_spec: None,
            flag_binding: None,
            sync_on_construct: false,
        }
    }

    /// Inherit every field of `parent`, and its link spec unless this schema declares one.
    pub fn extends(mut self, parent: &Arc<RecordSchema>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Declare a field.
    pub fn field(
        mut self,
        name: impl Into<String>,
        ty: FieldType,
        default: impl Into<Value>,
    ) -> Self {
        self.fields.push(FieldDescriptor::new(name, ty, default));
        self
    }

    /// Declare a field with help text.
    pub fn field_with_help(
        mut self,
        name: impl Into<String>,
        ty: FieldType,
        default: impl Into<Value>,
        help: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldDescriptor::new(name, ty, default).with_help(help));
        self
    }

    /// Attach a `:param <field>: <text>` documentation block.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attach a link spec. Replaces any spec set earlier on this builder.
    pub fn with_link_spec(mut self, spec: LinkSpec) -> Self {
        self.link_spec = Some(spec);
        self
    }

    /// Request flag registration when the schema is finalized.
    pub fn with_flag_binding(mut self, options: BindOptions) -> Self {
        self.flag_binding = Some(options);
        self
    }

    /// Apply the resolved link spec to every record built with `build_synced`.
    pub fn sync_on_construct(mut self, enabled: bool) -> Self {
        self.sync_on_construct = enabled;
        self
    }

    /// Freeze the schema without touching any registry.
    pub fn build(self) -> Result<Arc<RecordSchema>, SchemaError> {
        let mut fields: IndexMap<String, FieldDescriptor> = self
            .parent
            .as_deref()
            .map(|parent| parent.fields.clone())
            .unwrap_or_default();

        for field in &self.fields {
            if !field.default_value().matches(field.field_type()) {
                return Err(SchemaError::DefaultTypeMismatch {
                    schema: self.name.clone(),
                    field: field.name().to_string(),
                    expected: field.field_type(),
                    default: field.default_value().clone(),
                });
            }
            if fields
                .insert(field.name().to_string(), field.clone())
                .is_some()
            {
                return Err(SchemaError::DuplicateField {
                    schema: self.name.clone(),
                    field: field.name().to_string(),
                });
            }
        }

        let link_spec = match &self.link_spec {
            Some(spec) => {
                if let Some((field, flag)) = spec
                    .iter()
                    .find(|(field, _)| !fields.contains_key(*field))
                {
                    return Err(SchemaError::UnknownLinkedField {
                        schema: self.name.clone(),
                        field: field.to_string(),
                        flag: flag.to_string(),
                    });
                }
                Some(spec.clone())
            }
            None => self
                .parent
                .as_deref()
                .and_then(|parent| parent.link_spec.clone()),
        };

        let own_help = own_help(self.doc.as_deref(), &self.fields);

        tracing::debug!(
            schema = %self.name,
            fields = fields.len(),
            linked = link_spec.as_ref().map_or(0, LinkSpec::len),
            "schema built"
        );

        Ok(Arc::new(RecordSchema {
            name: self.name,
            parent: self.parent,
            own_fields: self.fields,
            doc: self.doc,
            own_link_spec: self.link_spec,
            flag_binding: self.flag_binding,
            sync_on_construct: self.sync_on_construct,
            fields,
            link_spec,
            own_help,
        }))
    }

    /// Freeze the schema and register its flags if a flag binding was requested.
    pub fn finalize(self, registry: &mut FlagRegistry) -> Result<Arc<RecordSchema>, SchemaError> {
        let schema = self.build()?;
        if let Some(options) = schema.flag_binding() {
            FlagBinder::new(options.clone())
                .bind(&schema, registry)
                .map_err(|source| SchemaError::Bind {
                    schema: schema.name().to_string(),
                    source,
                })?;
        }
        Ok(schema)
    }
}
