//! Run configuration parsing.
//!
//! A run configuration defines or overrides test groups:
//!
//! ```toml
//! [groups.unit]
//! dirs = ["tests/unit/", "tests/pytests/unit/"]
//! pytest_args = ["-ra"]
//! ```
//!
//! Groups given here replace the built-in group of the same name; other
//! built-in groups stay available.

use salt_test_core::RunConfig;
use serde::Deserialize;
use tracing::info;

use crate::document::parse_table;
use crate::error::{ConfigError, ConfigResult};
use crate::source::Source;

/// Load a run configuration from a path or URL, layered over the built-in
/// groups.
pub fn load_run_config(reference: &str) -> ConfigResult<RunConfig> {
    let source = Source::parse(reference)?;
    info!(source = %source, "Loading run configuration");
    let text = source.fetch_text(None)?;
    parse_run_config(&text, &source.to_string())
}

/// Parse run configuration text, layered over the built-in groups.
pub fn parse_run_config(text: &str, target: &str) -> ConfigResult<RunConfig> {
    let table = parse_table(text, target)?;
    let custom = RunConfig::deserialize(toml::Value::Table(table)).map_err(|e| {
        ConfigError::Run {
            target: target.to_string(),
            message: e.message().to_string(),
        }
    })?;
    Ok(RunConfig::builtin().overlay(custom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_keeps_builtin_groups() {
        assert_eq!(parse_run_config("", "inline").unwrap(), RunConfig::builtin());
    }

    #[test]
    fn test_config_overrides_and_adds_groups() {
        let config = parse_run_config(
            r#"
            [groups.unit]
            dirs = ["tests/pytests/unit/"]

            [groups.smoke]
            dirs = ["tests/pytests/functional/test_ping.py"]
            pytest_args = ["-x", "--run-destructive"]
            "#,
            "config.toml",
        )
        .unwrap();

        let unit = config.group("unit").unwrap();
        assert_eq!(unit.dirs, vec!["tests/pytests/unit/"]);
        assert!(unit.pytest_args.is_empty());

        let smoke = config.group("smoke").unwrap();
        assert_eq!(smoke.pytest_args, vec!["-x", "--run-destructive"]);
        assert_eq!(config.group("scenarios").unwrap().pytest_args, vec!["--slow"]);
    }

    #[test]
    fn test_missing_dirs_is_an_error() {
        let err = parse_run_config("[groups.unit]\npytest_args = []\n", "config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Run { .. }));
    }

    #[test]
    fn test_unknown_group_field_is_an_error() {
        let err = parse_run_config("[groups.unit]\ndirs = []\ndir = []\n", "config.toml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Run { ref target, .. } if target == "config.toml"));
    }

    #[test]
    fn test_unknown_top_level_key_is_an_error() {
        let err = parse_run_config("[unit]\ndirs = []\n", "config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Run { .. }));
    }
}
