//! Record instances of a schema.
//!
//! Responsibilities:
//! - Build records from supplied values and schema defaults.
//! - Track which fields the caller supplied explicitly.
//! - Run linked synchronization at construction for schemas that opted in.
//!
//! Does NOT handle:
//! - The reconciliation rule itself (see `sync`).
//!
//! Invariants:
//! - Every field holds a value of its declared type (or null).
//! - A field is marked supplied when set through `RecordBuilder::set` or
//!   `Record::set`; values adopted from flags are not marked.
//! - Construction-time synchronization happens at most once per record.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

use crate::error::RecordError;
use crate::registry::FlagRegistry;
use crate::schema::RecordSchema;
use crate::sync::{SyncPolicy, sync_links};
use crate::value::Value;

fn check_value(schema: &RecordSchema, name: &str, value: &Value) -> Result<usize, RecordError> {
    let (index, field) = schema
        .field_entry(name)
        .ok_or_else(|| RecordError::UnknownField {
            schema: schema.name().to_string(),
            field: name.to_string(),
        })?;
    if !value.matches(field.field_type()) {
        return Err(RecordError::TypeMismatch {
            schema: schema.name().to_string(),
            field: name.to_string(),
            expected: field.field_type(),
            value: value.clone(),
        });
    }
    Ok(index)
}

/// Builder for a `Record`.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    schema: Arc<RecordSchema>,
    supplied: Vec<Option<Value>>,
}

impl RecordBuilder {
    pub(crate) fn new(schema: Arc<RecordSchema>) -> Self {
        let supplied = vec![None; schema.field_count()];
        Self { schema, supplied }
    }

    /// Supply a field value explicitly.
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Result<Self, RecordError> {
        let value = value.into();
        let index = check_value(&self.schema, name, &value)?;
        self.supplied[index] = Some(value);
        Ok(self)
    }

    /// Build the record without consulting any registry.
    ///
    /// Schemas built with `sync_on_construct(true)` should be instantiated
    /// with [`RecordBuilder::build_synced`]; here their link spec is ignored.
    pub fn build(self) -> Record {
        if self.schema.syncs_on_construct() && self.schema.link_spec().is_some() {
            tracing::warn!(
                schema = %self.schema.name(),
                "schema syncs on construct but was built without a registry"
            );
        }
        self.assemble()
    }

    /// Build the record and, if the schema opted into sync-on-construct,
    /// apply its resolved link spec against `registry`.
    ///
    /// # Errors
    ///
    /// `RecordError::UnresolvedFlag` if a linked flag is not registered.
    pub fn build_synced(self, registry: &FlagRegistry) -> Result<Record, RecordError> {
        let mut record = self.assemble();
        let schema = Arc::clone(&record.schema);
        if schema.syncs_on_construct()
            && let Some(links) = schema.link_spec()
        {
            sync_links(&mut record, registry, links, SyncPolicy::default())?;
        }
        Ok(record)
    }

    fn assemble(self) -> Record {
        let mut values = Vec::with_capacity(self.supplied.len());
        let mut supplied = Vec::with_capacity(self.supplied.len());
        for (field, value) in self.schema.fields().zip(self.supplied) {
            supplied.push(value.is_some());
            values.push(value.unwrap_or_else(|| field.default_value().clone()));
        }
        Record {
            schema: self.schema,
            values,
            supplied,
        }
    }
}

/// An instance of a `RecordSchema`.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: Vec<Value>,
    supplied: Vec<bool>,
}

impl Record {
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema
            .field_index(name)
            .and_then(|index| self.values.get(index))
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Set a field explicitly, marking it supplied.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), RecordError> {
        let value = value.into();
        let index = check_value(&self.schema, name, &value)?;
        self.values[index] = value;
        self.supplied[index] = true;
        Ok(())
    }

    /// Whether the caller supplied `name` explicitly.
    pub fn is_supplied(&self, name: &str) -> bool {
        self.schema
            .field_index(name)
            .is_some_and(|index| self.is_supplied_index(index))
    }

    /// Whether `name` currently equals its schema default.
    pub fn is_at_default(&self, name: &str) -> bool {
        self.schema
            .field_index(name)
            .is_some_and(|index| self.is_at_default_index(index))
    }

    /// `(field name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .fields()
            .map(|field| field.name())
            .zip(self.values.iter())
    }

    pub(crate) fn is_supplied_index(&self, index: usize) -> bool {
        self.supplied.get(index).copied().unwrap_or(false)
    }

    pub(crate) fn is_at_default_index(&self, index: usize) -> bool {
        match (self.schema.field_at(index), self.values.get(index)) {
            (Some(field), Some(value)) => field.default_value() == value,
            _ => false,
        }
    }

    /// Store a value taken from a flag. Does not mark the field supplied.
    pub(crate) fn adopt(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
