//! Package flavors.
//!
//! The Salt test suite ships in several packages, one per Python flavor.
//! The flavor decides which package holds the test suite and which pytest
//! executable runs it.

use derive_more::Display;
use regex::Regex;
use std::sync::LazyLock;

/// Prefix of the site-packages directory the test suite installs into.
static TESTSUITE_ROOT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/usr/lib/.*/site-packages/salt-testsuite").unwrap());

static PYTHON_FLAVOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^python([0-9]+)$").unwrap());

/// Package whose `Provides` is queried to resolve the generic `python3` flavor.
pub const PYTHON3_TESTSUITE_CAPABILITY: &str = "python3-salt-testsuite";

/// Python flavor of the installed test suite.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Flavor {
    /// The Salt Bundle (`venv-salt-minion`).
    #[display("bundle")]
    Bundle,
    /// A system Python, e.g. `python3` or `python311`.
    #[display("python{version}")]
    Python { version: String },
    /// Anything else, used verbatim as the package prefix.
    #[display("{_0}")]
    Other(String),
}

impl Flavor {
    /// Parse a flavor name. `classic` is an alias for `python3`.
    pub fn parse(name: &str) -> Self {
        if name == "bundle" {
            return Flavor::Bundle;
        }
        if name == "classic" {
            return Flavor::Python {
                version: "3".to_string(),
            };
        }
        match PYTHON_FLAVOR_REGEX.captures(name) {
            Some(caps) => Flavor::Python {
                version: caps[1].to_string(),
            },
            None => Flavor::Other(name.to_string()),
        }
    }

    pub fn is_bundle(&self) -> bool {
        matches!(self, Flavor::Bundle)
    }

    /// Whether the flavor names the unversioned `python3` capability,
    /// which may need resolving to a concrete versioned package.
    pub fn is_generic_python3(&self) -> bool {
        matches!(self, Flavor::Python { version } if version == "3")
    }

    /// Name of the package containing the test suite.
    pub fn testsuite_package(&self) -> String {
        match self {
            Flavor::Bundle => "venv-salt-minion-testsuite".to_string(),
            other => format!("{}-salt-testsuite", other),
        }
    }

    /// Command prefix that launches pytest with this flavor's interpreter.
    pub fn pytest_command(&self) -> Vec<String> {
        match self {
            Flavor::Bundle => vec!["/usr/lib/venv-salt-minion/bin/pytest".to_string()],
            Flavor::Python { version } if version.chars().count() == 1 => vec![
                "/usr/bin/python3".to_string(),
                "-m".to_string(),
                "pytest".to_string(),
            ],
            Flavor::Python { version } => {
                let split = version.chars().next().map_or(0, char::len_utf8);
                let (major, minor) = version.split_at(split);
                vec![format!("/usr/bin/pytest-{}.{}", major, minor)]
            }
            Flavor::Other(_) => vec!["/usr/bin/pytest".to_string()],
        }
    }
}

/// Resolve the generic `python3` flavor from `rpm --whatprovides` output.
///
/// The package name looks like `python311-salt-testsuite-3006.0-1.1.noarch`;
/// the flavor is everything before the first `-`.
pub fn flavor_from_whatprovides(output: &str) -> Option<Flavor> {
    let name = output.trim().split('-').next()?;
    if name.is_empty() {
        return None;
    }
    Some(Flavor::parse(name))
}

/// Find the test suite root among the files of the test suite package.
pub fn find_testsuite_root<I, S>(files: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    files.into_iter().find_map(|file| {
        TESTSUITE_ROOT_REGEX
            .find(file.as_ref())
            .map(|m| m.as_str().to_string())
    })
}
