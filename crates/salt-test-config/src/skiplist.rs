//! Skiplist parsing and validation.
//!
//! A skiplist has one table per test group. Each group may list `files`,
//! `tests` and `keywords`, all arrays of strings:
//!
//! ```toml
//! [unit]
//! files = ["tests/unit/test_flaky.py"]
//! tests = ["tests/unit/test_x.py::TestX::test_known_broken"]
//! keywords = ["boto"]
//! ```
//!
//! Any other key inside a group is rejected: a typo would otherwise
//! silently run a test that was meant to be skipped.

use std::collections::BTreeMap;

use salt_test_core::{EntrySet, GroupSkip, Skiplist, Subgroup};
use tracing::{debug, info};

use crate::document::{Node, parse_document};
use crate::error::{ConfigResult, ValidationError};
use crate::source::Source;

/// Load and validate a skiplist from a path or URL.
pub fn load_skiplist(reference: &str, expected_sha256: Option<&str>) -> ConfigResult<Skiplist> {
    let source = Source::parse(reference)?;
    info!(source = %source, "Loading skiplist");
    let text = source.fetch_text(expected_sha256)?;
    parse_skiplist(&text, &source.to_string())
}

/// Parse and validate skiplist text. `target` names the document in errors.
pub fn parse_skiplist(text: &str, target: &str) -> ConfigResult<Skiplist> {
    let document = parse_document(text, target)?;
    let skiplist = validate(&document)?;
    debug!(
        groups = ?skiplist.group_names().collect::<Vec<_>>(),
        "Skiplist validated"
    );
    Ok(skiplist)
}

/// Validate a parsed document into a [`Skiplist`].
pub fn validate(document: &Node) -> Result<Skiplist, ValidationError> {
    let root = expect_table(document, "")?;

    let mut groups = BTreeMap::new();
    for (name, node) in root {
        let group = validate_group(name, node)?;
        groups.insert(name.clone(), group);
    }
    Ok(Skiplist::from_groups(groups))
}

fn validate_group(name: &str, node: &Node) -> Result<GroupSkip, ValidationError> {
    let group_path = key_path(&[name]);
    let table = expect_table(node, &group_path)?;

    let mut group = GroupSkip::new();
    for (key, value) in table {
        let path = key_path(&[name, key]);
        let subgroup =
            Subgroup::from_key(key).ok_or_else(|| ValidationError::UnknownKey { path: path.clone() })?;
        collect_entries(value, &path, group.entries_mut(subgroup))?;
    }
    Ok(group)
}

fn collect_entries(node: &Node, path: &str, entries: &mut EntrySet) -> Result<(), ValidationError> {
    let Node::Array(items) = node else {
        return Err(wrong_type(path, "array of strings", node));
    };
    for (idx, item) in items.iter().enumerate() {
        match item {
            Node::String(s) => {
                entries.insert(s.as_str());
            }
            other => return Err(wrong_type(&format!("{}[{}]", path, idx), "string", other)),
        }
    }
    Ok(())
}

fn expect_table<'a>(
    node: &'a Node,
    path: &str,
) -> Result<&'a BTreeMap<String, Node>, ValidationError> {
    match node {
        Node::Table(table) => Ok(table),
        other => Err(wrong_type(path, "table", other)),
    }
}

fn wrong_type(path: &str, expected: &'static str, got: &Node) -> ValidationError {
    ValidationError::WrongType {
        path: path.to_string(),
        expected,
        got: got.kind(),
    }
}

/// Dotted key path; keys that are not bare TOML keys are quoted.
fn key_path(keys: &[&str]) -> String {
    keys.iter()
        .map(|key| {
            let bare = !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if bare {
                key.to_string()
            } else {
                format!("{:?}", key)
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use salt_test_core::resolve;

    fn validation_error(text: &str) -> ValidationError {
        match parse_skiplist(text, "inline") {
            Err(ConfigError::Validation(e)) => e,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_groups_and_subgroups() {
        let skiplist = parse_skiplist(
            r#"
            [unit]
            files = [
                "tests/unit/modules/test_boto3_elasticsearch.py",
                "tests/unit/utils/test_boto3mod.py",
            ]
            tests = [
                "tests/unit/test_config.py::SampleConfTest::test_conf_master_sample_is_commented",
            ]

            [functional]
            tests = [
                "tests/pytests/functional/modules/test_sdb.py::test_setting_sdb_values_with_text_and_bytes_should_retain_data_types[bang]",
            ]
            keywords = ["zeromq"]
            "#,
            "inline",
        )
        .unwrap();

        let unit = skiplist.group("unit").unwrap();
        assert_eq!(unit.files.len(), 2);
        assert_eq!(unit.tests.len(), 1);
        assert!(unit.keywords.is_empty());

        let functional = skiplist.group("functional").unwrap();
        assert!(functional.files.is_empty());
        assert_eq!(functional.keywords.as_slice(), &["zeromq"]);
        assert!(skiplist.group("integration").is_none());
    }

    #[test]
    fn test_empty_document() {
        let skiplist = parse_skiplist("", "inline").unwrap();
        assert!(skiplist.is_empty());
        assert!(resolve(&skiplist, "unit").is_empty());
    }

    #[test]
    fn test_empty_group_table() {
        let skiplist = parse_skiplist("[integration]\n", "inline").unwrap();
        assert_eq!(skiplist.group("integration"), Some(&GroupSkip::new()));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = validation_error("[unit]\nbogus = [\"x\"]\n");
        assert_eq!(
            err,
            ValidationError::UnknownKey {
                path: "unit.bogus".to_string()
            }
        );
    }

    #[test]
    fn test_typo_in_subgroup_is_rejected() {
        let err = validation_error("[unit]\nfile = [\"tests/unit/test_a.py\"]\n");
        assert_eq!(err.path(), "unit.file");
    }

    #[test]
    fn test_scalar_is_not_wrapped() {
        let err = validation_error("[unit]\nfiles = \"a.py\"\n");
        assert_eq!(
            err,
            ValidationError::WrongType {
                path: "unit.files".to_string(),
                expected: "array of strings",
                got: "string",
            }
        );
    }

    #[test]
    fn test_non_string_leaf_reports_index() {
        let err = validation_error("[unit]\ntests = [\"a.py::test_a\", 42]\n");
        assert_eq!(
            err,
            ValidationError::WrongType {
                path: "unit.tests[1]".to_string(),
                expected: "string",
                got: "integer",
            }
        );
    }

    #[test]
    fn test_group_must_be_table() {
        let err = validation_error("unit = [\"a.py\"]\n");
        assert_eq!(
            err,
            ValidationError::WrongType {
                path: "unit".to_string(),
                expected: "table",
                got: "array",
            }
        );
    }

    #[test]
    fn test_nested_tables_are_rejected() {
        let err = validation_error("[unit.files]\npath = \"a.py\"\n");
        assert!(matches!(
            err,
            ValidationError::WrongType { ref path, got: "table", .. } if path == "unit.files"
        ));
    }

    #[test]
    fn test_quoted_group_names_in_paths() {
        let err = validation_error("[\"unit tests\"]\nbogus = []\n");
        assert_eq!(err.path(), "\"unit tests\".bogus");
    }

    #[test]
    fn test_duplicates_within_subgroup_collapse() {
        let skiplist =
            parse_skiplist("[unit]\nfiles = [\"a\", \"a\", \"b\"]\n", "inline").unwrap();
        assert_eq!(skiplist.group("unit").unwrap().files.as_slice(), &["a", "b"]);
    }

    #[test]
    fn test_end_to_end_resolution() {
        let skiplist = parse_skiplist(
            r#"
            [unit]
            files = ["a_test.py"]
            [functional]
            tests = ["b_test.py::test_one", "b_test.py::test_one"]
            "#,
            "inline",
        )
        .unwrap();

        let unit = resolve(&skiplist, "unit");
        assert_eq!(unit.files.as_slice(), &["a_test.py"]);
        assert!(unit.tests.is_empty());
        assert!(unit.keywords.is_empty());

        let functional = resolve(&skiplist, "functional");
        assert!(functional.files.is_empty());
        assert_eq!(functional.tests.as_slice(), &["b_test.py::test_one"]);
        assert!(functional.keywords.is_empty());

        assert!(resolve(&skiplist, "other").is_empty());
        assert_eq!(resolve(&skiplist, "unit"), unit);
    }
}
