//! Environment variable overrides for registered flags.
//!
//! Responsibilities:
//! - Read `<PREFIX><FLAG_NAME>` variables and apply them as flag overrides.
//! - Load `.env` files into the process environment, gated by `FLAGBIND_DOTENV_DISABLED`.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Command-line argument parsing.
//! - Registering flags (see `store.rs` and `binder`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Only flags that are already registered are looked up.
//! - Invalid values return `RegistryError::InvalidValue` before any override is applied.

use std::path::Path;

use super::error::RegistryError;
use super::store::FlagRegistry;
use crate::constants::DOTENV_DISABLED_VAR;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Environment variable name that overrides `flag` under `prefix`.
pub fn env_key(prefix: &str, flag: &str) -> String {
    format!("{}{}", prefix, flag.to_ascii_uppercase())
}

fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
        Some("true") | Some("1")
    )
}

fn map_dotenv_error(err: dotenvy::Error) -> Option<RegistryError> {
    match err {
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => None,
        dotenvy::Error::LineParse(_, idx) => Some(RegistryError::DotenvParse { error_index: idx }),
        dotenvy::Error::Io(io_err) => Some(RegistryError::DotenvIo {
            kind: io_err.kind(),
        }),
        _ => Some(RegistryError::DotenvUnknown),
    }
}

impl FlagRegistry {
    /// Apply overrides from environment variables named `<prefix><FLAG_NAME>`.
    ///
    /// Every pending value is parsed before any flag changes, so an invalid
    /// variable leaves the registry untouched.
    ///
    /// Returns the names of the flags that were overridden, in name order.
    pub fn apply_env(&mut self, prefix: &str) -> Result<Vec<String>, RegistryError> {
        let mut pending = Vec::new();
        for flag in self.iter() {
            let Some(raw) = env_var_or_none(&env_key(prefix, flag.name())) else {
                continue;
            };
            let value = flag.field_type().parse(&raw).map_err(|message| {
                RegistryError::InvalidValue {
                    name: flag.name().to_string(),
                    message,
                }
            })?;
            pending.push((flag.name().to_string(), value));
        }

        let mut applied = Vec::with_capacity(pending.len());
        for (name, value) in pending {
            self.set(&name, value)?;
            applied.push(name);
        }
        Ok(applied)
    }

    /// Load a `.env` file from the current directory (or its parents) into the environment.
    ///
    /// Missing files are ignored. If `FLAGBIND_DOTENV_DISABLED` is `1` or `true`,
    /// nothing is loaded.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv() -> Result<(), RegistryError> {
        if dotenv_disabled() {
            return Ok(());
        }
        match dotenvy::dotenv() {
            Ok(_) => Ok(()),
            Err(e) => map_dotenv_error(e).map_or(Ok(()), Err),
        }
    }

    /// Load a specific `.env` file into the environment.
    ///
    /// Same gating and error behavior as [`FlagRegistry::load_dotenv`].
    pub fn load_dotenv_from(path: &Path) -> Result<(), RegistryError> {
        if dotenv_disabled() {
            return Ok(());
        }
        match dotenvy::from_path(path) {
            Ok(()) => Ok(()),
            Err(e) => map_dotenv_error(e).map_or(Ok(()), Err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{FieldType, Value};
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn registry() -> FlagRegistry {
        let mut registry = FlagRegistry::new();
        registry
            .register("batch_size", FieldType::Integer, Value::Int(32), "")
            .unwrap();
        registry
            .register("model_dir", FieldType::String, Value::Null, "")
            .unwrap();
        registry
    }

    #[test]
    fn test_env_key_uppercases_flag_name() {
        assert_eq!(env_key("FLAGS_", "batch_size"), "FLAGS_BATCH_SIZE");
    }

    #[test]
    #[serial]
    fn test_env_var_or_none_trims_and_filters() {
        temp_env::with_vars(
            [
                ("FLAGBIND_TEST_EMPTY", Some("")),
                ("FLAGBIND_TEST_SPACES", Some("   ")),
                ("FLAGBIND_TEST_PADDED", Some("  value  ")),
            ],
            || {
                assert_eq!(env_var_or_none("FLAGBIND_TEST_EMPTY"), None);
                assert_eq!(env_var_or_none("FLAGBIND_TEST_SPACES"), None);
                assert_eq!(
                    env_var_or_none("FLAGBIND_TEST_PADDED"),
                    Some("value".to_string())
                );
            },
        );
    }

    #[test]
    #[serial]
    fn test_apply_env_overrides_registered_flags() {
        temp_env::with_vars(
            [
                ("FLAGS_BATCH_SIZE", Some("64")),
                ("FLAGS_MODEL_DIR", Some("/data/model")),
                ("FLAGS_UNREGISTERED", Some("ignored")),
            ],
            || {
                let mut registry = registry();
                let applied = registry.apply_env("FLAGS_").unwrap();
                assert_eq!(applied, vec!["batch_size", "model_dir"]);
                assert_eq!(
                    registry.get_current_value("batch_size"),
                    Some(&Value::Int(64))
                );
                assert_eq!(
                    registry.get_current_value("model_dir"),
                    Some(&Value::from("/data/model"))
                );
                assert!(!registry.has("unregistered"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_apply_env_ignores_blank_values() {
        temp_env::with_vars([("FLAGS_BATCH_SIZE", Some("  "))], || {
            let mut registry = registry();
            let applied = registry.apply_env("FLAGS_").unwrap();
            assert!(applied.is_empty());
            assert!(!registry.is_overridden("batch_size"));
        });
    }

    #[test]
    #[serial]
    fn test_apply_env_invalid_value() {
        temp_env::with_vars([("FLAGS_BATCH_SIZE", Some("many"))], || {
            let mut registry = registry();
            let err = registry.apply_env("FLAGS_").unwrap_err();
            assert!(matches!(
                err,
                RegistryError::InvalidValue { ref name, .. } if name == "batch_size"
            ));
        });
    }

    #[test]
    #[serial]
    fn test_apply_env_invalid_value_leaves_earlier_flags_untouched() {
        temp_env::with_vars(
            [
                ("FLAGS_BATCH_SIZE", Some("64")),
                ("FLAGS_STEPS", Some("forever")),
            ],
            || {
                let mut registry = registry();
                registry
                    .register("steps", FieldType::Integer, Value::Int(100), "")
                    .unwrap();
                let err = registry.apply_env("FLAGS_").unwrap_err();
                assert!(matches!(
                    err,
                    RegistryError::InvalidValue { ref name, .. } if name == "steps"
                ));
                assert!(!registry.is_overridden("batch_size"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_load_dotenv_from_missing_file_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        temp_env::with_var(DOTENV_DISABLED_VAR, None::<&str>, || {
            let result = FlagRegistry::load_dotenv_from(&temp_dir.path().join(".env"));
            assert!(result.is_ok(), "Missing .env file should be silently ignored");
        });
    }

    #[test]
    #[serial]
    fn test_load_dotenv_from_feeds_apply_env() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "FLAGS_BATCH_SIZE=128\n").unwrap();

        temp_env::with_vars(
            [
                (DOTENV_DISABLED_VAR, None::<&str>),
                ("FLAGS_BATCH_SIZE", None::<&str>),
            ],
            || {
                FlagRegistry::load_dotenv_from(&path).unwrap();
                let mut registry = registry();
                registry.apply_env("FLAGS_").unwrap();
                assert_eq!(
                    registry.get_current_value("batch_size"),
                    Some(&Value::Int(128))
                );
            },
        );
    }

    #[test]
    #[serial]
    fn test_invalid_dotenv_does_not_leak_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(
            &path,
            "FLAGS_SECRET=unterminated_secret_value\nINVALID_LINE_WITHOUT_EQUALS",
        )
        .unwrap();

        temp_env::with_var(DOTENV_DISABLED_VAR, None::<&str>, || {
            let err = FlagRegistry::load_dotenv_from(&path).unwrap_err();
            assert!(!err.to_string().contains("unterminated_secret_value"));
        });
    }

    #[test]
    #[serial]
    fn test_dotenv_disabled_skips_loading() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "INVALID_LINE_WITHOUT_EQUALS").unwrap();

        temp_env::with_var(DOTENV_DISABLED_VAR, Some("1"), || {
            assert!(FlagRegistry::load_dotenv_from(&path).is_ok());
        });
    }
}
