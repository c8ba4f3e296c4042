//! Single-pass traversal of one file.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::context::{FileContext, RuleContext};
use crate::registry::ActiveRuleSet;
use crate::rule::PARSE_ERROR_ID;
use crate::syntax::{NodeId, ParseError, Position, SourceParser, SyntaxTree};
use crate::types::{Finding, Location, Severity};
use crate::utils::Allowances;

/// Findings of one file, as sent from a worker to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path relative to the analysis root.
    pub path: PathBuf,
    /// Findings sorted in report order.
    pub findings: Vec<Finding>,
    /// Whether the file could not be parsed.
    pub parse_failed: bool,
}

/// Parses a file and runs the active rules over its tree.
///
/// Cheap to clone; the rule set and parser are shared.
#[derive(Clone)]
pub struct Linter {
    rules: Arc<ActiveRuleSet>,
    parser: Arc<dyn SourceParser>,
}

impl Linter {
    /// Creates a linter over a resolved rule set.
    #[must_use]
    pub fn new(rules: Arc<ActiveRuleSet>, parser: Arc<dyn SourceParser>) -> Self {
        Self { rules, parser }
    }

    /// The active rules.
    #[must_use]
    pub fn rules(&self) -> &ActiveRuleSet {
        &self.rules
    }

    /// The parser adapter.
    #[must_use]
    pub fn parser(&self) -> &dyn SourceParser {
        &*self.parser
    }

    /// Lints `source`, reporting findings against `path`.
    ///
    /// A file that does not parse yields exactly one `parse-error` finding
    /// and no rule runs for it.
    #[must_use]
    pub fn lint_source(&self, path: &Path, source: &str) -> FileReport {
        debug!("Linting: {}", path.display());

        let parsed = panic::catch_unwind(AssertUnwindSafe(|| self.parser.parse(source)))
            .unwrap_or_else(|payload| {
                error!(
                    "Parser {} failed on {}: {}",
                    self.parser.language_id(),
                    path.display(),
                    panic_message(payload.as_ref())
                );
                Err(ParseError::new(
                    format!("parser failed: {}", panic_message(payload.as_ref())),
                    Position::new(1, 1),
                ))
            });
        let tree = match parsed {
            Ok(tree) => tree,
            Err(err) => {
                warn!("Failed to parse {}: {}", path.display(), err);
                return parse_failure(path, adapter_failure(path, source, &err));
            }
        };

        if let Some(node) = tree.first_error() {
            let finding = syntax_error(path, source, &tree, node);
            warn!("Failed to parse {}: {}", path.display(), finding.message);
            return parse_failure(path, finding);
        }

        let findings = self.lint_tree(path, source, &tree);
        FileReport {
            path: path.to_path_buf(),
            findings,
            parse_failed: false,
        }
    }

    /// Runs the active rules over an already parsed, error-free tree.
    #[must_use]
    pub fn lint_tree(&self, path: &Path, source: &str, tree: &SyntaxTree) -> Vec<Finding> {
        let file = FileContext { path, source, tree };
        let mut findings = Vec::new();

        for node in tree.preorder() {
            for active in self.rules.rules_for(tree.kind(node)) {
                let ctx = RuleContext::new(file, active);
                match panic::catch_unwind(AssertUnwindSafe(|| active.rule().check(node, &ctx))) {
                    Ok(found) => findings.extend(found.into_iter().map(|mut f| {
                        active.id().clone_into(&mut f.rule_id);
                        f.severity = active.severity();
                        f
                    })),
                    Err(payload) => {
                        let at = tree.node(node).start;
                        error!(
                            "Rule {} failed on {}:{}:{}: {}",
                            active.id(),
                            path.display(),
                            at.line,
                            at.column,
                            panic_message(payload.as_ref())
                        );
                    }
                }
            }
        }

        let allowances = Allowances::from_tree(tree, source);
        if !allowances.is_empty() {
            findings.retain(|f| {
                let check = allowances.check(f.location.line, &f.rule_id);
                if check.is_allowed() {
                    debug!(
                        "Allowed {} at {}:{} ({})",
                        f.rule_id,
                        path.display(),
                        f.location.line,
                        check.reason().unwrap_or("no reason given")
                    );
                }
                !check.is_allowed()
            });
        }

        findings.sort_by(Finding::report_order);
        findings
    }
}

impl std::fmt::Debug for Linter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linter")
            .field("language", &self.parser.language_id())
            .field("rules", &self.rules.len())
            .finish()
    }
}

fn parse_failure(path: &Path, finding: Finding) -> FileReport {
    FileReport {
        path: path.to_path_buf(),
        findings: vec![finding],
        parse_failed: true,
    }
}

fn syntax_error(path: &Path, source: &str, tree: &SyntaxTree, node: NodeId) -> Finding {
    let n = tree.node(node);
    let message = if n.kind == "ERROR" {
        let snippet = tree.text(node, source).lines().next().unwrap_or("").trim();
        if snippet.is_empty() {
            "Syntax error".to_string()
        } else {
            format!("Syntax error: unexpected `{}`", truncate(snippet, 24))
        }
    } else {
        format!("Syntax error: missing `{}`", n.kind)
    };

    Finding::new(
        PARSE_ERROR_ID,
        Severity::Error,
        Location::new(path.to_path_buf(), n.start.line, n.start.column)
            .with_span(n.start_byte, n.end_byte - n.start_byte),
        n.kind,
        message,
    )
}

fn adapter_failure(path: &Path, source: &str, err: &ParseError) -> Finding {
    let offset = line_offset(source, err.position.line) + err.position.column.saturating_sub(1);
    Finding::new(
        PARSE_ERROR_ID,
        Severity::Error,
        Location::new(path.to_path_buf(), err.position.line, err.position.column)
            .with_span(offset.min(source.len()), 0),
        "ERROR",
        format!("Syntax error: {}", err.message),
    )
}

fn line_offset(source: &str, line: usize) -> usize {
    source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum()
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((i, _)) => format!("{}...", &text[..i]),
        None => text.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
