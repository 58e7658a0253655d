//! Record schemas: named, typed, defaulted fields with single inheritance.
//!
//! Responsibilities:
//! - Define `FieldDescriptor` and the frozen `RecordSchema`.
//! - Expose the flattened field table, resolved link spec, and own help entries.
//! - Walk the ancestor chain for extraction that needs per-level data.
//!
//! Does NOT handle:
//! - Declaring schemas (see `builder.rs`).
//! - Registering flags or synchronizing records (see `binder`, `sync`).
//!
//! Invariants:
//! - A schema is immutable once built and shared as `Arc<RecordSchema>`.
//! - Inherited fields come first, in ancestor declaration order, then own fields.
//! - Field names are unique across the flattened table.

mod builder;

use indexmap::IndexMap;
use std::sync::Arc;

pub use builder::SchemaBuilder;

use crate::binder::BindOptions;
use crate::link::LinkSpec;
use crate::record::RecordBuilder;
use crate::value::{FieldType, Value};

/// Declaration of a single schema field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    ty: FieldType,
    default: Value,
    help: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: FieldType, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            ty,
            default: default.into(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
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

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

/// A frozen record schema.
#[derive(Debug)]
pub struct RecordSchema {
    name: String,
    parent: Option<Arc<RecordSchema>>,
    own_fields: Vec<FieldDescriptor>,
    doc: Option<String>,
    own_link_spec: Option<LinkSpec>,
    flag_binding: Option<BindOptions>,
    sync_on_construct: bool,
    fields: IndexMap<String, FieldDescriptor>,
    link_spec: Option<LinkSpec>,
    own_help: IndexMap<String, String>,
}

impl RecordSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<RecordSchema>> {
        self.parent.as_ref()
    }

    /// This schema followed by its ancestors, nearest first.
    pub fn ancestry(&self) -> impl Iterator<Item = &RecordSchema> {
        std::iter::successors(Some(self), |schema| schema.parent.as_deref())
    }

    /// Fields declared directly on this schema.
    pub fn own_fields(&self) -> &[FieldDescriptor] {
        &self.own_fields
    }

    /// All fields, inherited first.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    pub(crate) fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    pub(crate) fn field_entry(&self, name: &str) -> Option<(usize, &FieldDescriptor)> {
        self.fields
            .get_full(name)
            .map(|(index, _, field)| (index, field))
    }

    pub(crate) fn field_at(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get_index(index).map(|(_, field)| field)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// The link spec declared on this schema, ignoring ancestors.
    pub fn own_link_spec(&self) -> Option<&LinkSpec> {
        self.own_link_spec.as_ref()
    }

    /// The link spec that applies to this schema: its own, else the nearest ancestor's.
    pub fn link_spec(&self) -> Option<&LinkSpec> {
        self.link_spec.as_ref()
    }

    /// Flag binding options recorded with `SchemaBuilder::with_flag_binding`.
    pub fn flag_binding(&self) -> Option<&BindOptions> {
        self.flag_binding.as_ref()
    }

    pub fn syncs_on_construct(&self) -> bool {
        self.sync_on_construct
    }

    /// Help entries declared by this schema alone.
    pub(crate) fn own_help(&self) -> &IndexMap<String, String> {
        &self.own_help
    }

    /// Start building an instance of this schema.
    pub fn record(self: &Arc<Self>) -> RecordBuilder {
        RecordBuilder::new(Arc::clone(self))
    }
}
