//! Context types for rule execution.

use std::path::Path;

use crate::config::RuleOptions;
use crate::registry::ActiveRule;
use crate::syntax::{NodeId, SyntaxTree};
use crate::types::{Finding, Location, Severity};

/// Per-file state shared by every rule invocation on that file.
///
/// Owned by the engine for the duration of one file's analysis.
#[derive(Debug, Clone, Copy)]
pub struct FileContext<'a> {
    /// Path relative to the analysis root.
    pub path: &'a Path,
    /// File contents.
    pub source: &'a str,
    /// Parsed tree of `source`.
    pub tree: &'a SyntaxTree,
}

/// Read-only view handed to [`Rule::check`](crate::Rule::check).
///
/// Exposes the tree, the source text, ancestor queries and the rule's
/// resolved options and severity.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    file: FileContext<'a>,
    rule_id: &'static str,
    severity: Severity,
    options: &'a RuleOptions,
}

impl<'a> RuleContext<'a> {
    /// Creates the context for one active rule on one file.
    #[must_use]
    pub fn new(file: FileContext<'a>, rule: &'a ActiveRule) -> Self {
        Self {
            file,
            rule_id: rule.id(),
            severity: rule.severity(),
            options: rule.options(),
        }
    }

    /// Path of the file being checked, relative to the analysis root.
    #[must_use]
    pub fn path(&self) -> &'a Path {
        self.file.path
    }

    /// Full source text of the file.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.file.source
    }

    /// The file's syntax tree.
    #[must_use]
    pub fn tree(&self) -> &'a SyntaxTree {
        self.file.tree
    }

    /// Options configured for the running rule.
    #[must_use]
    pub fn options(&self) -> &'a RuleOptions {
        self.options
    }

    /// Effective severity of the running rule.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Source text of `node`.
    #[must_use]
    pub fn text(&self, node: NodeId) -> &'a str {
        self.file.tree.text(node, self.file.source)
    }

    /// Kind of `node`.
    #[must_use]
    pub fn kind(&self, node: NodeId) -> &'static str {
        self.file.tree.kind(node)
    }

    /// Parent of `node`.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.file.tree.parent(node)
    }

    /// Ancestors of `node`, nearest first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + 'a {
        self.file.tree.ancestors(node)
    }

    /// Location of `node` in this file.
    #[must_use]
    pub fn location(&self, node: NodeId) -> Location {
        let n = self.file.tree.node(node);
        Location::new(self.file.path.to_path_buf(), n.start.line, n.start.column)
            .with_span(n.start_byte, n.end_byte - n.start_byte)
    }

    /// Builds a finding for the running rule at `node`.
    #[must_use]
    pub fn finding(&self, node: NodeId, message: impl Into<String>) -> Finding {
        Finding::new(
            self.rule_id,
            self.severity,
            self.location(node),
            self.kind(node),
            message,
        )
    }
}
