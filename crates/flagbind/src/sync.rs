//! Default-aware synchronization of records from the flag registry.
//!
//! Responsibilities:
//! - Pull overridden flag values into record fields the caller left alone.
//! - Apply a resolved link spec, where a field may mirror a differently named flag.
//!
//! Does NOT handle:
//! - Registering flags (see `binder`).
//! - Deciding when linked synchronization runs (see `RecordBuilder::build_synced`).
//!
//! Invariants:
//! - A field is only replaced when it is eligible under the `SyncPolicy`
//!   AND the flag's current value differs from the flag's default.
//! - A replaced field is no longer at its default, so a second pass never
//!   touches it again.
//! - Synchronization by field name never fails; missing flags are skipped.

use crate::error::RecordError;
use crate::link::LinkSpec;
use crate::record::Record;
use crate::registry::{Flag, FlagRegistry};

/// Which record fields may adopt a flag value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncPolicy {
    /// Fields the caller never supplied and that still hold their schema default.
    #[default]
    Unsupplied,
    /// Fields whose value equals the schema default, however it got there.
    AtDefault,
}

impl SyncPolicy {
    fn is_eligible(self, record: &Record, index: usize) -> bool {
        let at_default = record.is_at_default_index(index);
        match self {
            SyncPolicy::Unsupplied => at_default && !record.is_supplied_index(index),
            SyncPolicy::AtDefault => at_default,
        }
    }
}

/// Adopt `flag`'s current value into field `index` if the rule allows it.
fn reconcile(record: &mut Record, index: usize, flag: &Flag, policy: SyncPolicy) {
    if !flag.is_overridden() || !policy.is_eligible(record, index) {
        return;
    }
    let Some(field) = record.schema().field_at(index) else {
        return;
    };
    let field_name = field.name().to_string();
    let value = flag.current_value();
    if !value.matches(field.field_type()) {
        tracing::warn!(
            schema = %record.schema().name(),
            field = %field_name,
            flag = %flag.name(),
            expected = %field.field_type(),
            actual = %flag.field_type(),
            "flag type does not match field type, skipping"
        );
        return;
    }
    tracing::debug!(
        schema = %record.schema().name(),
        field = %field_name,
        flag = %flag.name(),
        value = %value,
        "field adopted flag value"
    );
    record.adopt(index, value.clone());
}

/// Synchronize `record` from flags named after its fields, using the default policy.
pub fn sync(record: &mut Record, registry: &FlagRegistry) {
    sync_with(record, registry, SyncPolicy::default());
}

/// Synchronize `record` from flags named after its fields.
///
/// Every field with a same-named flag is replaced by the flag's current value
/// when the field is eligible under `policy` and the flag is overridden.
/// Fields without a flag are left untouched.
pub fn sync_with(record: &mut Record, registry: &FlagRegistry, policy: SyncPolicy) {
    let schema = std::sync::Arc::clone(record.schema());
    for (index, field) in schema.fields().enumerate() {
        if let Some(flag) = registry.get(field.name()) {
            reconcile(record, index, flag, policy);
        }
    }
}

/// Synchronize `record` through a link spec.
///
/// All linked flag names are resolved before any field changes, so an
/// unresolved flag leaves the record untouched.
pub(crate) fn sync_links(
    record: &mut Record,
    registry: &FlagRegistry,
    links: &LinkSpec,
    policy: SyncPolicy,
) -> Result<(), RecordError> {
    let mut resolved = Vec::with_capacity(links.len());
    for (field, flag_name) in links.iter() {
        let flag = registry
            .get(flag_name)
            .ok_or_else(|| RecordError::UnresolvedFlag {
                schema: record.schema().name().to_string(),
                field: field.to_string(),
                flag: flag_name.to_string(),
            })?;
        let index = record
            .schema()
            .field_index(field)
            .ok_or_else(|| RecordError::UnknownField {
                schema: record.schema().name().to_string(),
                field: field.to_string(),
            })?;
        resolved.push((index, flag));
    }

    for (index, flag) in resolved {
        reconcile(record, index, flag, policy);
    }
    Ok(())
}
