//! salt-test: run the Salt test suite by test group.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod run;
mod suite;

#[derive(Debug, Parser)]
#[command(name = "salt-test")]
#[command(about = "Run the Salt test suite by test group", long_about = None)]
struct Cli {
    /// Location of the skiplist (TOML). Can be a HTTP URL.
    #[arg(short, long, env = "SALT_TEST_SKIPLIST")]
    skiplist: Option<String>,

    /// Expected SHA-256 of the skiplist, checked before it is parsed
    #[arg(long, value_name = "HEX", requires = "skiplist")]
    skiplist_sha256: Option<String>,

    /// Location of the run configuration (TOML). Can be a HTTP URL.
    #[arg(short, long, env = "SALT_TEST_CONFIG")]
    config: Option<String>,

    /// Python environment of the test suite, e.g. 'bundle', 'classic', 'python3', 'python311'
    #[arg(short = 'f', long, env = "SALT_TEST_FLAVOR", default_value = "bundle")]
    package_flavor: String,

    /// Root of the test suite. Overrides the root found from --package-flavor.
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Print the pytest command without running it
    #[arg(long)]
    dry_run: bool,

    /// Group of tests to run
    test_group: String,

    /// Extra arguments for pytest, separated from the test group by --
    #[arg(last = true)]
    pytest_args: Vec<String>,
}

impl From<Cli> for run::RunOptions {
    fn from(cli: Cli) -> Self {
        Self {
            skiplist: cli.skiplist,
            skiplist_sha256: cli.skiplist_sha256,
            config: cli.config,
            package_flavor: cli.package_flavor,
            directory: cli.directory,
            dry_run: cli.dry_run,
            test_group: cli.test_group,
            pytest_args: cli.pytest_args,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = run::run(&cli.into())?;
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "salt-test",
            "-s",
            "skipped.toml",
            "-c",
            "config.toml",
            "-f",
            "classic",
            "unit",
            "--",
            "--slow",
        ])
        .unwrap();

        assert_eq!(cli.skiplist.as_deref(), Some("skipped.toml"));
        assert_eq!(cli.config.as_deref(), Some("config.toml"));
        assert_eq!(cli.package_flavor, "classic");
        assert_eq!(cli.directory, None);
        assert_eq!(cli.test_group, "unit");
        assert_eq!(cli.pytest_args, vec!["--slow"]);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_parse_directory_and_defaults() {
        let cli = Cli::try_parse_from([
            "salt-test",
            "-s",
            "skipped.toml",
            "-c",
            "config.toml",
            "-d",
            "/code/",
            "functional",
        ])
        .unwrap();

        assert_eq!(cli.directory, Some(PathBuf::from("/code/")));
        assert_eq!(cli.package_flavor, "bundle");
        assert_eq!(cli.test_group, "functional");
        assert!(cli.pytest_args.is_empty());
    }

    #[test]
    fn test_checksum_requires_skiplist() {
        let result = Cli::try_parse_from(["salt-test", "--skiplist-sha256", "abc", "unit"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_test_group_is_required() {
        assert!(Cli::try_parse_from(["salt-test", "-s", "skipped.toml"]).is_err());
    }

    #[test]
    fn test_cli_into_options() {
        let cli = Cli::try_parse_from(["salt-test", "--dry-run", "-d", "/code", "scenarios"]).unwrap();
        let opts: run::RunOptions = cli.into();
        assert!(opts.dry_run);
        assert_eq!(opts.test_group, "scenarios");
        assert_eq!(opts.directory, Some(PathBuf::from("/code")));
    }
}
