//! Per-field help text extraction.
//!
//! Responsibilities:
//! - Parse `:param <field>: <text>` documentation blocks.
//! - Combine a schema's declared field help with its documentation block.
//! - Merge help across the ancestor chain for nested extraction.
//!
//! Does NOT handle:
//! - Registering help text with flags (see `binder`).
//!
//! Invariants:
//! - Extraction never fails; undocumented fields are simply absent.
//! - Continuation lines are trimmed and joined with a single space.
//! - Help declared on a field descriptor wins over the documentation block.
//! - In nested extraction, a descendant's entry wins over an ancestor's.

use indexmap::IndexMap;

use crate::constants::PARAM_MARKER;
use crate::schema::{FieldDescriptor, RecordSchema};

/// Split a `:param name: text` line into `(name, text)`.
fn parse_param_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix(PARAM_MARKER)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let (name, text) = rest.split_once(':')?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some((name, text.trim()))
}

/// Parse a documentation block into a field -> help text mapping.
///
/// Lines that do not open a `:param` entry continue the previous entry.
/// Blank lines and text before the first entry are ignored.
pub fn parse_param_block(block: &str) -> IndexMap<String, String> {
    let mut entries: IndexMap<String, String> = IndexMap::new();
    let mut current: Option<String> = None;

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, text)) = parse_param_line(line) {
            entries.insert(name.to_string(), text.to_string());
            current = Some(name.to_string());
        } else if let Some(text) = current.as_ref().and_then(|name| entries.get_mut(name)) {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(line);
        }
    }

    entries
}

/// Help entries declared by one schema, ignoring ancestors.
pub(crate) fn own_help(doc: Option<&str>, fields: &[FieldDescriptor]) -> IndexMap<String, String> {
    let mut entries = doc.map(parse_param_block).unwrap_or_default();
    for field in fields {
        if let Some(help) = field.help() {
            entries.insert(field.name().to_string(), help.to_string());
        }
    }
    entries
}

/// Extract field help text for `schema`.
///
/// With `is_nested`, entries from every ancestor are merged in, root first,
/// so that a descendant's text for the same field replaces its ancestor's.
/// Without it, only entries declared by `schema` itself are returned.
pub fn extract_help_info(schema: &RecordSchema, is_nested: bool) -> IndexMap<String, String> {
    if !is_nested {
        return schema.own_help().clone();
    }

    let chain: Vec<&RecordSchema> = schema.ancestry().collect();
    let mut merged = IndexMap::new();
    for ancestor in chain.into_iter().rev() {
        for (field, text) in ancestor.own_help() {
            merged.insert(field.clone(), text.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CONFIG_DOC: &str = "
    :param test_int1: integer 1 for test
    :param test_int2: integer 2 for test
    :param test_str: string for test
                        and test another line
  ";

    #[test]
    fn test_parse_joins_continuation_lines() {
        let entries = parse_param_block(TEST_CONFIG_DOC);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries["test_int1"], "integer 1 for test");
        assert_eq!(entries["test_int2"], "integer 2 for test");
        assert_eq!(entries["test_str"], "string for test and test another line");
    }

    #[test]
    fn test_parse_ignores_leading_prose() {
        let entries = parse_param_block("Training options.\n\n:param lr: learning rate");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["lr"], "learning rate");
    }

    #[test]
    fn test_parse_empty_description_takes_continuation() {
        let entries = parse_param_block(":param lr:\n    the learning rate");
        assert_eq!(entries["lr"], "the learning rate");
    }

    #[test]
    fn test_parse_rejects_malformed_markers() {
        let entries = parse_param_block(":param lr: rate\n:paramfoo: bar\n:param two words: x");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["lr"], "rate :paramfoo: bar :param two words: x");
    }

    #[test]
    fn test_parse_keeps_colons_in_text() {
        let entries = parse_param_block(":param addr: host:port pair");
        assert_eq!(entries["addr"], "host:port pair");
    }

    #[test]
    fn test_parse_empty_block() {
        assert!(parse_param_block("").is_empty());
        assert!(parse_param_block("no params here").is_empty());
    }
}
