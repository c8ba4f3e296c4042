//! # guidelint
//!
//! Style guide linter for JavaScript and React.
//!
//! This is the facade crate that re-exports the core engine, the built-in
//! rules and the JavaScript parser adapter, plus a few one-call helpers.
//!
//! ## Linting a snippet
//!
//! ```rust,ignore
//! let report = guidelint::lint_source("src/api.js", "const basePath = \"/api\";\n")?;
//! assert_eq!(report.findings[0].suggestion.as_deref(), Some("BASE_PATH"));
//! ```
//!
//! ## Linting a tree
//!
//! ```rust,ignore
//! let report = guidelint::analyzer()?
//!     .root("./web")
//!     .input("src")
//!     .build()?
//!     .analyze()?;
//! std::process::exit(report.exit_code());
//! ```
//!
//! ## Allowance comments
//!
//! ```js
//! // guidelint: allow(react/no-dangerous-html) reason="sanitized upstream"
//! <div dangerouslySetInnerHTML={{ __html: html }} />
//! ```

#![forbid(unsafe_code)]

use std::path::Path;
use std::sync::Arc;

pub use guidelint_core::*;
pub use guidelint_js::JsParser;

/// Built-in rules.
pub mod rules {
    pub use guidelint_rules::*;
}

/// Registry holding every built-in rule.
///
/// # Errors
///
/// Returns an error if two built-in rules share an id.
pub fn default_registry() -> Result<RuleRegistry, RegistryError> {
    guidelint_rules::builtin_registry()
}

/// Analyzer builder preloaded with the JavaScript parser and the built-in
/// rules.
///
/// # Errors
///
/// See [`default_registry`].
pub fn analyzer() -> Result<AnalyzerBuilder, RegistryError> {
    Ok(Analyzer::builder()
        .parser(JsParser::new())
        .registry(default_registry()?))
}

/// Single-file linter over the built-in rules, resolved against `config`.
///
/// # Errors
///
/// Returns an error if `config` names an unknown rule or carries an
/// invalid option.
pub fn linter(config: &Config) -> Result<Linter, AnalyzerError> {
    let rules = default_registry()?.resolve(config)?;
    Ok(Linter::new(Arc::new(rules), Arc::new(JsParser::new())))
}

/// Lints one in-memory source with the default configuration.
///
/// # Errors
///
/// See [`linter`].
pub fn lint_source(path: impl AsRef<Path>, source: &str) -> Result<Report, AnalyzerError> {
    lint_source_with(&Config::default(), path, source)
}

/// Lints one in-memory source with `config`.
///
/// # Errors
///
/// See [`linter`].
pub fn lint_source_with(
    config: &Config,
    path: impl AsRef<Path>,
    source: &str,
) -> Result<Report, AnalyzerError> {
    let file = linter(config)?.lint_source(path.as_ref(), source);
    Ok(Report::from_file_reports([file]))
}
