//! guidelint CLI tool.
//!
//! Usage:
//! ```bash
//! guidelint check [OPTIONS] [INPUTS]...
//! guidelint list-rules
//! guidelint init
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use guidelint_core::AnalyzerError;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// No error findings.
pub const EXIT_OK: u8 = 0;
/// At least one error finding.
pub const EXIT_FINDINGS: u8 = 1;
/// Invocation, configuration or input error.
pub const EXIT_USAGE: u8 = 2;
/// The run exceeded its time budget.
pub const EXIT_TIMEOUT: u8 = 3;
/// The run was interrupted.
pub const EXIT_INTERRUPTED: u8 = 130;

/// Style guide linter for JavaScript and React
#[derive(Parser)]
#[command(name = "guidelint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "GUIDELINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint files, directories or glob patterns
    Check(commands::check::CheckArgs),

    /// List built-in rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per finding, grouped by file.
    Text,
    /// Structured JSON document.
    Json,
    /// Graphical diagnostics with source snippets.
    Pretty,
}

impl From<OutputFormat> for guidelint_core::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
            OutputFormat::Pretty => Self::Pretty,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check(args) => {
            let project_dir = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
            let source = config_resolver::resolve(&project_dir, cli.config.as_deref());
            commands::check::run(args, &source).await
        }
        Commands::ListRules => commands::list_rules::run().map(|()| EXIT_OK),
        Commands::Init { force } => commands::init::run(force).map(|()| EXIT_OK),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Maps the root cause of a failed command to an exit status.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        match cause.downcast_ref::<AnalyzerError>() {
            Some(AnalyzerError::Timeout { .. }) => return EXIT_TIMEOUT,
            Some(AnalyzerError::Cancelled) => return EXIT_INTERRUPTED,
            _ => {}
        }
    }
    EXIT_USAGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::time::Duration;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_flags() {
        let cli = Cli::try_parse_from([
            "guidelint",
            "-v",
            "check",
            "src",
            "lib/**/*.jsx",
            "--format",
            "json",
            "--exclude",
            "**/fixtures/**",
            "--jobs",
            "2",
            "--timeout",
            "30",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.inputs, vec!["src", "lib/**/*.jsx"]);
        assert!(matches!(args.format, Some(OutputFormat::Json)));
        assert_eq!(args.exclude, vec!["**/fixtures/**"]);
        assert_eq!(args.jobs, Some(2));
        assert_eq!(args.timeout, Some(30));
    }

    #[test]
    fn check_defaults() {
        let cli = Cli::try_parse_from(["guidelint", "check"]).unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert!(args.inputs.is_empty());
        assert!(args.format.is_none());
        assert!(args.root.is_none());
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["guidelint", "check", "--format", "xml"]).is_err());
    }

    #[test]
    fn maps_errors_to_exit_codes() {
        let timeout = anyhow::Error::new(AnalyzerError::Timeout {
            budget: Duration::from_secs(1),
            partial: Box::default(),
        });
        assert_eq!(exit_code_for(&timeout), EXIT_TIMEOUT);

        let cancelled = anyhow::Error::new(AnalyzerError::Cancelled).context("Analysis failed");
        assert_eq!(exit_code_for(&cancelled), EXIT_INTERRUPTED);

        let lost = anyhow::Error::new(AnalyzerError::Internal {
            message: "1 of 2 files were not linted".into(),
        })
        .context("Analysis failed");
        assert_eq!(exit_code_for(&lost), EXIT_USAGE);

        let missing = anyhow::Error::new(AnalyzerError::NoInputs);
        assert_eq!(exit_code_for(&missing), EXIT_USAGE);

        assert_eq!(exit_code_for(&anyhow::anyhow!("bad flag")), EXIT_USAGE);
    }
}
