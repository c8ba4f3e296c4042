//! Check command implementation.

use anyhow::{Context, Result};
use clap::Args;
use guidelint_core::{Analyzer, AnalyzerError};
use guidelint_js::JsParser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::config_resolver::ConfigSource;
use crate::{OutputFormat, EXIT_FINDINGS, EXIT_OK, EXIT_TIMEOUT, EXIT_USAGE};

/// Arguments of `guidelint check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Files, directories or glob patterns, relative to the root
    /// (default: the whole root)
    pub inputs: Vec<String>,

    /// Output format (overrides the config file)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Exclude patterns (can be specified multiple times)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Wall-clock budget for the whole run, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory inputs and reported paths are relative to
    /// (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,
}

/// Runs the check command and returns the process exit status.
///
/// Ctrl-C cancels the run; files already being linted finish first.
pub async fn run(args: CheckArgs, source: &ConfigSource) -> Result<u8> {
    let config = source.load()?;
    let format = args.format.map_or(config.format, Into::into);

    let registry =
        guidelint_rules::builtin_registry().context("Failed to register built-in rules")?;

    let mut builder = Analyzer::builder()
        .root(args.root.unwrap_or_else(|| PathBuf::from(".")))
        .inputs(args.inputs)
        .parser(JsParser::new())
        .registry(registry)
        .config(config);

    for pattern in args.exclude {
        builder = builder.exclude(pattern);
    }
    if let Some(jobs) = args.jobs {
        builder = builder.parallelism(jobs);
    }
    if let Some(secs) = args.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;
    let root = analyzer.root().to_path_buf();
    let token = analyzer.cancellation_token();

    info!(
        "Checking {} with {} rules on {} workers",
        root.display(),
        analyzer.rule_count(),
        analyzer.parallelism()
    );

    let mut task = tokio::task::spawn_blocking(move || analyzer.analyze());
    let joined = tokio::select! {
        joined = &mut task => joined,
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!("Interrupted, waiting for in-flight files");
            token.cancel();
            task.await
        }
    };

    match joined.context("Analysis task failed")? {
        Ok(report) => {
            super::output::print(&report, format, &root)?;
            if report.all_inputs_failed_to_parse() {
                warn!("None of the {} input file(s) parsed", report.files_checked);
                return Ok(EXIT_USAGE);
            }
            Ok(if report.has_errors() {
                EXIT_FINDINGS
            } else {
                EXIT_OK
            })
        }
        Err(AnalyzerError::Timeout { budget, partial }) => {
            warn!("Run exceeded its time budget of {budget:?}");
            super::output::print(&partial, format, &root)?;
            Ok(EXIT_TIMEOUT)
        }
        Err(err) => Err(err).context("Analysis failed"),
    }
}
