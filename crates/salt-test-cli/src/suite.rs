//! Discovery of the installed test suite through the package manager.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use salt_test_core::flavor::{
    PYTHON3_TESTSUITE_CAPABILITY, find_testsuite_root, flavor_from_whatprovides,
};
use salt_test_core::{Error, Flavor};
use tracing::{debug, info};

/// Resolve the generic `python3` flavor to the versioned flavor providing it.
///
/// On openSUSE Tumbleweed no package is literally called
/// `python3-salt-testsuite`; a versioned package provides the capability.
/// Other flavors are returned unchanged.
pub fn resolve_flavor(flavor: &Flavor) -> Flavor {
    if !flavor.is_generic_python3() {
        return flavor.clone();
    }
    let resolved = query(
        "rpm",
        &["-q", "--whatprovides", PYTHON3_TESTSUITE_CAPABILITY],
    )
    .as_deref()
    .and_then(flavor_from_whatprovides)
    .unwrap_or_else(|| flavor.clone());

    if &resolved != flavor {
        info!(flavor = %flavor, resolved = %resolved, "Resolved test suite flavor");
    }
    resolved
}

/// Locate the root directory of the test suite installed for `flavor`.
pub fn testsuite_root(flavor: &Flavor) -> salt_test_core::Result<PathBuf> {
    let files = package_files(&flavor.testsuite_package());
    let root = find_testsuite_root(&files)
        .ok_or_else(|| Error::SuiteNotInstalled(flavor.to_string()))?;
    debug!(root = %root, "Found test suite root");
    Ok(PathBuf::from(root))
}

/// List the files of `package` with rpm, falling back to dpkg.
fn package_files(package: &str) -> Vec<String> {
    let queries: [(&str, &[&str]); 2] = [("rpm", &["-q", "-l", package]), ("dpkg", &["-L", package])];
    queries
        .into_iter()
        .find_map(|(program, args)| query(program, args))
        .map(|stdout| stdout.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Run a package manager query, returning stdout on success.
///
/// A package manager that is not installed counts as a failed query.
fn query(program: &str, args: &[&str]) -> Option<String> {
    let output = match Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(program, "Package manager not available");
            return None;
        }
        Err(e) => {
            debug!(program, error = %e, "Package manager query failed");
            return None;
        }
    };

    if !output.status.success() {
        debug!(program, ?args, status = %output.status, "Package query returned failure");
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}
