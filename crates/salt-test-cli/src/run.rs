//! Composing and launching a pytest run.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use salt_test_config::{load_run_config, load_skiplist};
use salt_test_core::command::PytestCommand;
use salt_test_core::{Flavor, RunConfig, Skiplist, resolve};
use tracing::{info, warn};

use crate::suite;

/// Options for one invocation.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub skiplist: Option<String>,
    pub skiplist_sha256: Option<String>,
    pub config: Option<String>,
    pub package_flavor: String,
    pub directory: Option<PathBuf>,
    pub dry_run: bool,
    pub test_group: String,
    pub pytest_args: Vec<String>,
}

/// Run pytest for the requested test group and return its exit code.
pub fn run(opts: &RunOptions) -> Result<i32> {
    let cmd = prepare(opts)?;
    println!("Running: {}", cmd.display());

    if opts.dry_run {
        return Ok(0);
    }
    launch(&cmd)
}

/// Everything up to, but not including, launching pytest.
fn prepare(opts: &RunOptions) -> Result<PytestCommand> {
    let config = match &opts.config {
        Some(reference) => load_run_config(reference)
            .with_context(|| format!("Failed to load run configuration: {}", reference))?,
        None => RunConfig::builtin(),
    };
    let group = config.group(&opts.test_group)?;

    let skiplist = match &opts.skiplist {
        Some(reference) => load_skiplist(reference, opts.skiplist_sha256.as_deref())
            .with_context(|| format!("Failed to load skiplist: {}", reference))?,
        None => Skiplist::empty(),
    };
    let plan = resolve(&skiplist, &opts.test_group);
    info!(
        group = %opts.test_group,
        files = plan.files.len(),
        tests = plan.tests.len(),
        keywords = plan.keywords.len(),
        "Resolved exclusion plan"
    );

    let flavor = Flavor::parse(&opts.package_flavor);
    let working_dir = match &opts.directory {
        Some(dir) => dir.clone(),
        None => suite::testsuite_root(&suite::resolve_flavor(&flavor))?,
    };

    Ok(PytestCommand::compose(
        &flavor,
        group,
        &plan,
        &opts.pytest_args,
        &working_dir,
    ))
}

fn launch(cmd: &PytestCommand) -> Result<i32> {
    let mut command = Command::new(cmd.program());
    command
        .args(cmd.args())
        .current_dir(&cmd.working_dir)
        .envs(cmd.env.iter().map(|(k, v)| (k, v)));
    for key in &cmd.env_remove {
        command.env_remove(key);
    }

    let status = command
        .status()
        .with_context(|| format!("Failed to launch {}", cmd.program()))?;

    match status.code() {
        Some(code) => Ok(code),
        None => {
            warn!(status = %status, "pytest terminated by signal");
            Ok(1)
        }
    }
}
