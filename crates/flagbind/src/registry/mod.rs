//! Flag registry: named, typed values with defaults and overrides.
//!
//! Responsibilities:
//! - Store flags registered by the binder or by hand.
//! - Accept overrides from explicit calls, environment variables, and `.env` files.
//! - Answer `has` / current / default lookups for synchronization.
//!
//! Does NOT handle:
//! - Command-line tokenization or flag-file formats.
//! - Deciding when a record field adopts a flag value (see `sync`).
//!
//! Invariants / Assumptions:
//! - The registry is an explicit value; there is no ambient global instance.
//! - All registration completes before records are constructed.

mod env;
mod error;
mod flag;
mod store;

pub use env::{env_key, env_var_or_none};
pub use error::RegistryError;
pub use flag::Flag;
pub use store::{FlagRegistry, Registration};
