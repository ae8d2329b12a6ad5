//! Test group definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Error, Result};

/// Where a test group lives inside the test suite and how pytest runs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestGroup {
    /// Directories relative to the test suite root.
    pub dirs: Vec<String>,
    /// Arguments always passed to pytest for this group.
    #[serde(default)]
    pub pytest_args: Vec<String>,
}

impl TestGroup {
    pub fn new<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
            pytest_args: Vec::new(),
        }
    }

    pub fn with_pytest_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pytest_args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// The set of test groups available for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub groups: BTreeMap<String, TestGroup>,
}

impl RunConfig {
    /// The groups shipped with the Salt test suite.
    pub fn builtin() -> Self {
        let groups = [
            (
                "unit",
                TestGroup::new(["tests/unit/", "tests/pytests/unit/"]),
            ),
            ("functional", TestGroup::new(["tests/pytests/functional"])),
            (
                "integration",
                TestGroup::new(["tests/integration/", "tests/pytests/integration/"]),
            ),
            (
                "scenarios",
                TestGroup::new(["tests/pytests/scenarios/"]).with_pytest_args(["--slow"]),
            ),
        ]
        .into_iter()
        .map(|(name, group)| (name.to_string(), group))
        .collect();

        Self { groups }
    }

    /// Layer `other` on top of `self`. Groups in `other` replace groups of
    /// the same name; new names are added.
    pub fn overlay(mut self, other: RunConfig) -> Self {
        self.groups.extend(other.groups);
        self
    }

    pub fn group(&self, name: &str) -> Result<&TestGroup> {
        self.groups.get(name).ok_or_else(|| Error::UnknownGroup {
            group: name.to_string(),
            known: self.group_names().collect::<Vec<_>>().join(", "),
        })
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}
