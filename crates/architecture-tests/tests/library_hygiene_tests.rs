//! Purpose: Keep panicking shortcuts out of library code.
//!
//! Library modules propagate errors with `Result` and `?`. This test scans
//! the non-test portion of every `src/` file and rejects `.unwrap()` and
//! `.expect(` outside comments. Test modules, integration tests, and doc
//! examples are exempt.

mod common;

use std::fs;

const FORBIDDEN: &[&str] = &[".unwrap()", ".expect("];

#[test]
fn test_no_unwrap_in_library_code() {
    let crates_dir = common::workspace_root().join("crates");
    let mut violations = Vec::new();

    for path in common::rust_files(&crates_dir) {
        let path_str = path.to_string_lossy();
        if !path_str.contains("/src/") {
            continue;
        }
        let content = fs::read_to_string(&path).unwrap_or_default();
        for (i, line) in common::non_test_source(&content).lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("//") {
                continue;
            }
            if FORBIDDEN.iter().any(|pattern| trimmed.contains(pattern)) {
                violations.push(format!("{}:{}: {}", path.display(), i + 1, trimmed));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Library code must propagate errors instead of panicking:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_non_test_source_stops_at_test_module() {
    let content = "fn a() {}\n#[cfg(test)]\nmod tests { fn b() { x.unwrap(); } }\n";
    assert_eq!(common::non_test_source(content), "fn a() {}\n");
}
