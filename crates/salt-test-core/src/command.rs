//! Pytest command composition.

use std::path::{Path, PathBuf};

use crate::emit::emit_with_selection;
use crate::flavor::Flavor;
use crate::group::TestGroup;
use crate::plan::ExclusionPlan;

/// Variables set by the Salt Bundle's environment that break a system
/// Python interpreter.
pub const VENV_ENV_VARS: [&str; 7] = [
    "CPATH",
    "LD_LIBRARY_PATH",
    "PYTHONHOME",
    "PYTHONSTARTUP",
    "SALT_CONFIG_DIR",
    "VENV_PIP_TARGET",
    "VIRTUAL_ENV",
];

/// A fully composed pytest invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PytestCommand {
    /// Program followed by its arguments.
    pub argv: Vec<String>,
    /// Directory pytest runs in; also exported as `PYTHONPATH`.
    pub working_dir: PathBuf,
    /// Variables to set in the child environment.
    pub env: Vec<(String, String)>,
    /// Variables to remove from the child environment.
    pub env_remove: Vec<String>,
}

impl PytestCommand {
    /// Compose the pytest command for one test group.
    ///
    /// The layout is: flavor command, group pytest args, extra args,
    /// exclusion arguments, then the group's test directories. Directories
    /// go last so they follow every flag.
    ///
    /// A `-k` in the group or extra args is lifted out and combined with the
    /// skiplist's keywords, since pytest would otherwise keep only one of them.
    pub fn compose(
        flavor: &Flavor,
        group: &TestGroup,
        plan: &ExclusionPlan,
        extra_args: &[String],
        working_dir: &Path,
    ) -> Self {
        let (args, selection) =
            split_keyword_selection(group.pytest_args.iter().chain(extra_args));

        let mut argv = flavor.pytest_command();
        argv.extend(args);
        argv.extend(emit_with_selection(plan, selection.as_deref()));
        argv.extend(group.dirs.iter().cloned());

        let env = vec![(
            "PYTHONPATH".to_string(),
            working_dir.display().to_string(),
        )];
        let env_remove = if flavor.is_bundle() {
            Vec::new()
        } else {
            VENV_ENV_VARS.iter().map(|v| v.to_string()).collect()
        };

        Self {
            argv,
            working_dir: working_dir.to_path_buf(),
            env,
            env_remove,
        }
    }

    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }

    /// Space-joined command line, as logged before launch.
    pub fn display(&self) -> String {
        self.argv.join(" ")
    }
}

/// Separate `-k EXPR`, `-kEXPR`, `--keyword EXPR` and `--keyword=EXPR` from
/// the other arguments.
///
/// Returns the remaining arguments and the last expression seen, which is
/// the one pytest honours. A trailing `-k` without a value is left in place.
fn split_keyword_selection<'a>(
    args: impl IntoIterator<Item = &'a String>,
) -> (Vec<String>, Option<String>) {
    let mut rest = Vec::new();
    let mut selection = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "-k" || arg == "--keyword" {
            match args.next() {
                Some(expr) => selection = Some(expr.clone()),
                None => rest.push(arg.clone()),
            }
        } else if let Some(expr) = arg.strip_prefix("--keyword=") {
            selection = Some(expr.to_string());
        } else if let Some(expr) = arg.strip_prefix("-k").filter(|e| !e.is_empty()) {
            selection = Some(expr.to_string());
        } else {
            rest.push(arg.clone());
        }
    }
    (rest, selection)
}
