//! Centralized constants for the flagbind crate.
//!
//! This module contains values shared by the registry, binder, and
//! record modules to avoid magic strings scattered across the crate.

// =============================================================================
// Environment Overrides
// =============================================================================

/// Default prefix for environment variables that override flags.
///
/// A flag named `batch_size` is overridden by `FLAGS_BATCH_SIZE`.
pub const DEFAULT_ENV_PREFIX: &str = "FLAGS_";

/// Environment variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_VAR: &str = "FLAGBIND_DOTENV_DISABLED";

// =============================================================================
// Parsing
// =============================================================================

/// Separator for string-list values supplied as a single string.
pub const LIST_SEPARATOR: char = ',';

/// Marker that opens a field entry in a documentation block.
pub const PARAM_MARKER: &str = ":param";
