//! Binding of configuration record schemas to a flag registry.
//!
//! This crate declares record schemas once and derives from them:
//! per-field help text, registry flags with matching defaults, and
//! construction-time reconciliation that pulls overridden flag values into
//! fields the caller did not supply.
//!
//! ```
//! use flagbind::{BindOptions, FieldType, FlagRegistry, SchemaBuilder, sync};
//!
//! let mut registry = FlagRegistry::new();
//! let schema = SchemaBuilder::new("TrainConfig")
//!     .field_with_help("batch_size", FieldType::Integer, 32i64, "rows per batch")
//!     .with_flag_binding(BindOptions::default())
//!     .finalize(&mut registry)
//!     .unwrap();
//!
//! registry.set("batch_size", 64i64).unwrap();
//! let mut config = schema.record().build();
//! sync(&mut config, &registry);
//! assert_eq!(config.get_int("batch_size"), Some(64));
//! ```

pub mod binder;
pub mod constants;
mod error;
pub mod help;
pub mod link;
pub mod record;
pub mod registry;
pub mod schema;
pub mod sync;
pub mod value;

pub use binder::{BindOptions, BindReport, FlagBinder};
pub use error::{BindError, RecordError, SchemaError};
pub use help::{extract_help_info, parse_param_block};
pub use link::LinkSpec;
pub use record::{Record, RecordBuilder};
pub use registry::{Flag, FlagRegistry, Registration, RegistryError, env_var_or_none};
pub use schema::{FieldDescriptor, RecordSchema, SchemaBuilder};
pub use sync::{SyncPolicy, sync, sync_with};
pub use value::{FieldType, Value};
