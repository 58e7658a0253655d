//! Purpose: Enforce deterministic temp file cleanup patterns in tests.
//!
//! Ensures temp files are created through the tempfile crate's RAII types
//! rather than the process temp dir with manual cleanup.
//!
//! Non-scope: sources are checked statically; nothing is executed.
//!
//! Invariants:
//! - Test code uses the tempfile crate for temp file management.
//! - No hardcoded /tmp paths in tests.
//! - Tempfile handles are bound to a named variable for the test's duration.

mod common;

use std::fs;
use std::path::PathBuf;

const TEMP_DIR_CALL: &str = concat!("std::env::", "temp_dir()");
const HARDCODED_TMP: &str = concat!("\"", "/tmp");

fn test_sources() -> Vec<(PathBuf, String)> {
    let crates_dir = common::workspace_root().join("crates");
    common::rust_files(&crates_dir)
        .into_iter()
        .filter_map(|path| {
            let content = fs::read_to_string(&path).ok()?;
            content.contains("#[test]").then_some((path, content))
        })
        .collect()
}

#[test]
fn test_no_manual_temp_dir_usage() {
    let mut violations = Vec::new();

    for (path, content) in test_sources() {
        if content.contains(TEMP_DIR_CALL) {
            violations.push(format!(
                "{}: uses the process temp dir - prefer tempfile::tempdir() for RAII cleanup",
                path.display()
            ));
        }
        if content.contains(HARDCODED_TMP) {
            violations.push(format!(
                "{}: contains hardcoded /tmp path - prefer tempfile crate",
                path.display()
            ));
        }
    }

    assert!(
        violations.is_empty(),
        "Found manual temp file patterns (not panic-safe):\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_tempfile_bindings_retained() {
    let mut violations = Vec::new();

    for (path, content) in test_sources() {
        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("let _ = tempfile::")
                || trimmed.starts_with("let _ = TempDir::new()")
                || (trimmed.contains("TempDir::new()") && !trimmed.starts_with("let "))
            {
                violations.push(format!(
                    "{}:{}: tempfile instance not retained - bind to a named variable",
                    path.display(),
                    i + 1
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Found tempfile instances not properly retained:\n{}",
        violations.join("\n")
    );
}
