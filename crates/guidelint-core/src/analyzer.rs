//! File discovery and the worker pool that lints files in parallel.

use crate::config::{Config, ConfigError};
use crate::engine::{FileReport, Linter};
use crate::registry::{RegistryError, RuleRegistry};
use crate::report::Report;
use crate::syntax::SourceParser;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// How often the aggregator wakes up to check cancellation and the deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Errors that can occur during analysis.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum AnalyzerError {
    /// A file or directory could not be read.
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(guidelint::analyzer::io))]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    #[diagnostic(code(guidelint::analyzer::glob))]
    Glob(#[from] glob::PatternError),

    /// Directory walk error.
    #[error("Failed to walk directory: {0}")]
    #[diagnostic(code(guidelint::analyzer::walk))]
    Walk(#[from] ignore::Error),

    /// An input path does not exist.
    #[error("Input path does not exist: {path}")]
    #[diagnostic(code(guidelint::analyzer::missing_input))]
    MissingInput {
        /// The missing path.
        path: PathBuf,
    },

    /// Inputs matched no lintable files.
    #[error("No files to analyze")]
    #[diagnostic(
        code(guidelint::analyzer::no_inputs),
        help("pass files, directories or glob patterns matching .js, .jsx, .mjs or .cjs files")
    )]
    NoInputs,

    /// The builder was not given a parser.
    #[error("No source parser configured")]
    #[diagnostic(code(guidelint::analyzer::missing_parser))]
    MissingParser,

    /// The run exceeded its wall-clock budget.
    #[error("Run exceeded its time budget of {budget:?}")]
    #[diagnostic(code(guidelint::analyzer::timeout))]
    Timeout {
        /// The configured budget.
        budget: Duration,
        /// Results of the files that completed in time.
        partial: Box<Report>,
    },

    /// The run was cancelled.
    #[error("Run cancelled")]
    #[diagnostic(code(guidelint::analyzer::cancelled))]
    Cancelled,

    /// Workers stopped before every file was linted.
    #[error("Analysis stopped early: {message}")]
    #[diagnostic(code(guidelint::analyzer::internal))]
    Internal {
        /// What went wrong.
        message: String,
    },

    /// Configuration error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// Registry error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),
}

/// Shared flag that stops a run from dispatching further files.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    inputs: Vec<String>,
    parser: Option<Arc<dyn SourceParser>>,
    registry: Option<RuleRegistry>,
    config: Option<Config>,
    exclude_patterns: Vec<String>,
    parallelism: Option<usize>,
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory inputs are resolved against and findings
    /// are reported relative to.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds an input: a file, a directory or a glob pattern.
    #[must_use]
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.inputs.push(input.into());
        self
    }

    /// Adds multiple inputs.
    #[must_use]
    pub fn inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }

    /// Sets the parser adapter.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Sets a shared parser adapter.
    #[must_use]
    pub fn parser_arc(mut self, parser: Arc<dyn SourceParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Sets the rule registry.
    #[must_use]
    pub fn registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the number of worker threads, overriding the configuration.
    #[must_use]
    pub fn parallelism(mut self, workers: usize) -> Self {
        self.parallelism = Some(workers);
        self
    }

    /// Sets the wall-clock budget for the whole run, overriding the
    /// configuration.
    #[must_use]
    pub fn timeout(mut self, budget: Duration) -> Self {
        self.timeout = Some(budget);
        self
    }

    /// Sets the token used to cancel the run from another thread.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was given, an exclude pattern is
    /// invalid, or the configuration does not resolve against the registry.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;
        let config = self.config.unwrap_or_default();
        let registry = self.registry.unwrap_or_default();
        let rules = registry.resolve(&config)?;

        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .map_err(|e| AnalyzerError::Io {
                    path: root.clone(),
                    source: e,
                })?
                .join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        let excludes = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let parallelism = self
            .parallelism
            .or(config.analyzer.parallelism)
            .unwrap_or_else(num_cpus::get)
            .max(1);

        Ok(Analyzer {
            root,
            inputs: self.inputs,
            linter: Linter::new(Arc::new(rules), parser),
            excludes,
            respect_gitignore: config.analyzer.respect_gitignore,
            parallelism,
            timeout: self.timeout.or_else(|| config.analyzer.timeout()),
            cancellation: self.cancellation.unwrap_or_default(),
        })
    }
}

/// Discovers files and lints them on a fixed-size worker pool.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    inputs: Vec<String>,
    linter: Linter,
    excludes: Vec<glob::Pattern>,
    respect_gitignore: bool,
    parallelism: usize,
    timeout: Option<Duration>,
    cancellation: CancellationToken,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of active rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.linter.rules().len()
    }

    /// Returns the number of worker threads a run may use.
    #[must_use]
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Returns the single-file linter used by the workers.
    #[must_use]
    pub fn linter(&self) -> &Linter {
        &self.linter
    }

    /// Returns the cancellation token of this analyzer.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Discovers and analyzes all inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails, no file matches, a file cannot
    /// be read, the run is cancelled or it exceeds its time budget.
    pub fn analyze(&self) -> Result<Report, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        if files.is_empty() {
            return Err(AnalyzerError::NoInputs);
        }
        info!("Found {} files to analyze", files.len());

        let report = self.analyze_files(files)?;

        info!(
            "Analysis complete: {} findings in {} files",
            report.findings.len(),
            report.files_checked
        );
        Ok(report)
    }

    /// Analyzes the given files on the worker pool.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::analyze`].
    pub fn analyze_files(&self, files: Vec<PathBuf>) -> Result<Report, AnalyzerError> {
        if self.cancellation.is_cancelled() {
            return Err(AnalyzerError::Cancelled);
        }

        let deadline = self.timeout.map(|budget| (budget, Instant::now() + budget));
        let workers = self.parallelism.min(files.len()).max(1);
        debug!("Spawning {} workers for {} files", workers, files.len());

        let total = files.len();
        let queue = Arc::new(files);
        let next = Arc::new(AtomicUsize::new(0));
        let stop = CancellationToken::new();
        let (tx, rx) = mpsc::channel::<Result<FileReport, AnalyzerError>>();

        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let queue = Arc::clone(&queue);
            let next = Arc::clone(&next);
            let tx = tx.clone();
            let linter = self.linter.clone();
            let root = self.root.clone();
            let cancellation = self.cancellation.clone();
            let stop = stop.clone();

            let handle = thread::Builder::new()
                .name(format!("guidelint-worker-{worker}"))
                .spawn(move || loop {
                    if cancellation.is_cancelled() || stop.is_cancelled() {
                        break;
                    }
                    let Some(path) = queue.get(next.fetch_add(1, Ordering::SeqCst)) else {
                        break;
                    };
                    if tx.send(lint_file(&linter, &root, path)).is_err() {
                        break;
                    }
                })
                .map_err(|e| AnalyzerError::Io {
                    path: self.root.clone(),
                    source: e,
                })?;
            handles.push(handle);
        }
        drop(tx);

        let mut fragments = Vec::with_capacity(total);
        loop {
            if self.cancellation.is_cancelled() {
                stop.cancel();
                warn!("Run cancelled after {} of {} files", fragments.len(), total);
                return Err(AnalyzerError::Cancelled);
            }

            let wait = match deadline {
                Some((budget, at)) => {
                    let now = Instant::now();
                    if now >= at {
                        stop.cancel();
                        warn!(
                            "Run exceeded its time budget after {} of {} files",
                            fragments.len(),
                            total
                        );
                        return Err(AnalyzerError::Timeout {
                            budget,
                            partial: Box::new(Report::from_file_reports(fragments).truncated()),
                        });
                    }
                    (at - now).min(POLL_INTERVAL)
                }
                None => POLL_INTERVAL,
            };

            match rx.recv_timeout(wait) {
                Ok(Ok(fragment)) => fragments.push(fragment),
                Ok(Err(err)) => {
                    stop.cancel();
                    return Err(err);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        for handle in handles {
            if handle.join().is_err() {
                error!("A worker thread panicked");
            }
        }

        self.collect(fragments, total)
    }

    fn collect(&self, fragments: Vec<FileReport>, total: usize) -> Result<Report, AnalyzerError> {
        if self.cancellation.is_cancelled() {
            return Err(AnalyzerError::Cancelled);
        }
        if fragments.len() < total {
            error!("Workers finished {} of {} files", fragments.len(), total);
            return Err(AnalyzerError::Internal {
                message: format!("{} of {} files were not linted", total - fragments.len(), total),
            });
        }
        Ok(Report::from_file_reports(fragments))
    }

    /// Resolves the inputs into a sorted, de-duplicated list of files.
    ///
    /// With no inputs the root directory is walked.
    ///
    /// # Errors
    ///
    /// Returns an error if an input does not exist or cannot be walked.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut files = Vec::new();

        if self.inputs.is_empty() {
            self.walk_dir(&self.root, &mut files)?;
        }

        for input in &self.inputs {
            if is_glob(input) {
                let pattern = self.root.join(input);
                for entry in glob::glob(&pattern.to_string_lossy())? {
                    let path = entry.map_err(|e| AnalyzerError::Io {
                        path: e.path().to_path_buf(),
                        source: e.into_error(),
                    })?;
                    if path.is_file() && self.is_lintable(&path) && !self.should_exclude(&path) {
                        files.push(path);
                    }
                }
                continue;
            }

            let path = self.root.join(input);
            if path.is_dir() {
                self.walk_dir(&path, &mut files)?;
            } else if path.is_file() {
                if self.is_lintable(&path) {
                    files.push(path);
                } else {
                    warn!("Skipping {}: not a recognised source file", path.display());
                }
            } else {
                return Err(AnalyzerError::MissingInput { path });
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    fn walk_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), AnalyzerError> {
        let walker = ignore::WalkBuilder::new(dir)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .require_git(false)
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) || !self.is_lintable(path) {
                continue;
            }
            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }
        Ok(())
    }

    fn is_lintable(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.linter.parser().extensions().contains(&ext))
    }

    /// Checks if a path matches an exclude pattern, either as given or
    /// relative to the root.
    fn should_exclude(&self, path: &Path) -> bool {
        let absolute = path.to_string_lossy();
        let relative = display_path(&self.root, path);
        let relative = relative.to_string_lossy();
        self.excludes
            .iter()
            .any(|p| p.matches(&absolute) || p.matches(&relative))
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("root", &self.root)
            .field("inputs", &self.inputs)
            .field("linter", &self.linter)
            .field("parallelism", &self.parallelism)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn lint_file(linter: &Linter, root: &Path, path: &Path) -> Result<FileReport, AnalyzerError> {
    let content = std::fs::read_to_string(path).map_err(|e| AnalyzerError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(linter.lint_source(&display_path(root, path), &content))
}

/// Path relative to `root` (when inside it) with `/` separators.
fn display_path(root: &Path, path: &Path) -> PathBuf {
    let relative = path.strip_prefix(root).unwrap_or(path);
    PathBuf::from(relative.to_string_lossy().replace('\\', "/"))
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '['])
}
