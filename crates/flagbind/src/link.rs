//! Declarative links from record fields to registry flags.
//!
//! A `LinkSpec` only records which flag feeds which field. It is attached to a
//! schema with `SchemaBuilder::with_link_spec` and applied by records built
//! with `RecordBuilder::build_synced`. Schemas without their own spec inherit
//! the nearest ancestor's.

use indexmap::IndexMap;

/// Ordered mapping of field name to registry flag name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSpec {
    links: IndexMap<String, String>,
}

impl LinkSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link each named field to the flag of the same name.
    pub fn linked_list<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            self.links.insert(name.clone(), name);
        }
        self
    }

    /// Link fields to differently named flags. A later entry for the same
    /// field replaces an earlier one.
    pub fn linked_map<I, F, N>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, N)>,
        F: Into<String>,
        N: Into<String>,
    {
        for (field, flag) in pairs {
            self.links.insert(field.into(), flag.into());
        }
        self
    }

    /// The flag linked to `field`, if any.
    pub fn flag_for(&self, field: &str) -> Option<&str> {
        self.links.get(field).map(String::as_str)
    }

    /// `(field, flag)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.links
            .iter()
            .map(|(field, flag)| (field.as_str(), flag.as_str()))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
