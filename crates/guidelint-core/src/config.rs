//! Configuration types for guidelint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration for guidelint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Report format (default: text).
    #[serde(default)]
    pub format: OutputFormat,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations keyed by rule id.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file.
    ///
    /// Files ending in `.json` are read as JSON, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::parse_json(&content)
        } else {
            Self::parse(&content)
        }
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled. Rules without an entry are enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        self.rules
            .get(rule_id)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_id: &str) -> Option<crate::Severity> {
        self.rules.get(rule_id).and_then(|c| c.severity)
    }

    /// Returns the configured options for a rule (empty if none).
    #[must_use]
    pub fn rule_options(&self, rule_id: &str) -> RuleOptions {
        self.rules
            .get(rule_id)
            .map(|c| c.options.clone())
            .unwrap_or_default()
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable listing grouped by file.
    #[default]
    Text,
    /// Structured JSON document.
    Json,
    /// Graphical diagnostics with source snippets.
    Pretty,
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files when walking directories.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Number of worker threads (default: number of CPUs).
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Wall-clock budget for the whole run, in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl AnalyzerConfig {
    /// Returns the configured run budget, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exclude: default_excludes(),
            respect_gitignore: true,
            parallelism: None,
            timeout_secs: None,
        }
    }
}

fn default_excludes() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/dist/**".to_string(),
        "**/build/**".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,

    /// Rule-specific options.
    #[serde(default)]
    pub options: RuleOptions,
}

/// Rule-specific options as key-value pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleOptions(BTreeMap<String, toml::Value>);

impl RuleOptions {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option, returning the updated set.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns true if no options are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over option names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the raw value of an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.0.get(key)
    }

    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.0
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.0
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Fails if any option is not in `allowed`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first unknown option.
    pub fn ensure_only(&self, allowed: &[&str]) -> Result<(), String> {
        match self.keys().find(|k| !allowed.contains(k)) {
            None => Ok(()),
            Some(key) if allowed.is_empty() => {
                Err(format!("unknown option `{key}` (this rule takes no options)"))
            }
            Some(key) => Err(format!(
                "unknown option `{key}` (expected one of: {})",
                allowed.join(", ")
            )),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(guidelint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(guidelint::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// The configuration names a rule that is not registered.
    #[error("Unknown rule `{id}` in configuration")]
    #[diagnostic(
        code(guidelint::config::unknown_rule),
        help("run `guidelint list-rules` to see the available rule ids")
    )]
    UnknownRule {
        /// The unknown rule id.
        id: String,
    },

    /// A rule rejected one of its options.
    #[error("Invalid option for rule `{rule}`: {message}")]
    #[diagnostic(code(guidelint::config::invalid_option))]
    InvalidOption {
        /// Rule id.
        rule: String,
        /// What was wrong with the option.
        message: String,
    },
}
