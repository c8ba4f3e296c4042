//! Core types for lint findings.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;

/// Severity level for findings.
///
/// Only [`Severity::Error`] affects the exit status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Style issue that should be addressed.
    Warning,
    /// Issue close to a correctness problem; fails the run.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unknown severity `{other}` (expected `error` or `warning`)"
            )),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the analysis root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    #[serde(skip)]
    pub offset: usize,
    /// Length of the span in bytes.
    #[serde(skip)]
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A rule violation found during analysis.
///
/// Findings are built once by the engine (through
/// [`RuleContext::finding`](crate::RuleContext::finding)) and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Rule id (e.g., `style/no-var`).
    pub rule_id: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Primary location of the finding.
    pub location: Location,
    /// Syntax node kind the finding is attached to.
    pub node_kind: String,
    /// Suggested replacement or refactoring, if the rule has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        location: Location,
        node_kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            location,
            node_kind: node_kind.into(),
            suggestion: None,
        }
    }

    /// Attaches a suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Total order used by reports: file, line, column, then rule id.
    #[must_use]
    pub fn report_order(&self, other: &Self) -> Ordering {
        self.location
            .file
            .cmp(&other.location.file)
            .then(self.location.line.cmp(&other.location.line))
            .then(self.location.column.cmp(&other.location.column))
            .then_with(|| self.rule_id.cmp(&other.rule_id))
            .then_with(|| self.message.cmp(&other.message))
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}  {}  {}  {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.rule_id,
            self.message
        )
    }
}

/// A finding rendered as a miette diagnostic with its source snippet.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct FindingDiagnostic {
    message: String,
    severity: Severity,
    source_code: NamedSource<String>,
    span: SourceSpan,
    label_message: String,
    help: Option<String>,
}

impl FindingDiagnostic {
    /// Builds a diagnostic for `finding` over the file's `source` text.
    #[must_use]
    pub fn new(finding: &Finding, source: String) -> Self {
        let offset = finding.location.offset.min(source.len());
        let length = finding.location.length.min(source.len() - offset);
        Self {
            message: format!("[{}] {}", finding.rule_id, finding.message),
            severity: finding.severity,
            source_code: NamedSource::new(finding.location.file.display().to_string(), source),
            span: SourceSpan::from((offset, length)),
            label_message: finding.rule_id.clone(),
            help: finding
                .suggestion
                .as_ref()
                .map(|s| format!("suggestion: {s}")),
        }
    }
}

impl Diagnostic for FindingDiagnostic {
    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label_message.clone()),
            self.span,
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_finding(file: &str, line: usize, column: usize, rule: &str) -> Finding {
        Finding::new(
            rule,
            Severity::Warning,
            Location::new(PathBuf::from(file), line, column),
            "identifier",
            "message",
        )
    }

    #[test]
    fn severity_orders_warning_below_error() {
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn severity_parses_lowercase_names() {
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn report_order_compares_file_line_column_then_rule() {
        let a = make_finding("a.js", 2, 1, "style/no-var");
        let b = make_finding("a.js", 2, 1, "style/strict-equality");
        let c = make_finding("a.js", 10, 1, "style/no-var");
        let d = make_finding("b.js", 1, 1, "style/no-var");

        assert_eq!(a.report_order(&b), Ordering::Less);
        assert_eq!(b.report_order(&c), Ordering::Less);
        assert_eq!(c.report_order(&d), Ordering::Less);
    }

    #[test]
    fn display_uses_report_line_layout() {
        let finding = make_finding("src/app.js", 3, 7, "style/no-var");
        assert_eq!(
            finding.to_string(),
            "src/app.js:3:7  warning  style/no-var  message"
        );
    }

    #[test]
    fn finding_serializes_camel_case_fields() {
        let finding = make_finding("src/app.js", 3, 7, "style/no-var");
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["ruleId"], "style/no-var");
        assert_eq!(json["nodeKind"], "identifier");
        assert_eq!(json["location"]["line"], 3);
        assert!(json["location"].get("offset").is_none());
        assert!(json.get("suggestion").is_none());

        let json = serde_json::to_value(finding.with_suggestion("BASE_PATH")).unwrap();
        assert_eq!(json["suggestion"], "BASE_PATH");
    }

    #[test]
    fn diagnostic_clamps_span_to_source() {
        let finding = make_finding("a.js", 1, 1, "style/no-var");
        let finding = Finding {
            location: finding.location.with_span(100, 10),
            ..finding
        };
        let diagnostic = FindingDiagnostic::new(&finding, "var x;".to_string());
        assert_eq!(diagnostic.span, SourceSpan::from((6, 0)));
    }
}
