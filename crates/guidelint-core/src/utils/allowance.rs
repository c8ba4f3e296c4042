//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // guidelint: allow(style/no-var) reason="generated shim"
//! const x = a == b; // guidelint: allow(style/strict-equality)
//! {/* guidelint: allow(react/no-index-as-key) */}
//! ```
//!
//! Only real comments count: the engine feeds in the parser's `comment`
//! nodes, so look-alike text inside string literals is ignored. A directive
//! applies to the line its comment starts on and to the line directly below.

use std::collections::{BTreeMap, HashSet};

use crate::syntax::SyntaxTree;

/// Result of checking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
struct AllowDirective {
    rules: HashSet<String>,
    reason: Option<String>,
}

/// All allowance directives of one file, indexed by line.
#[derive(Debug, Clone, Default)]
pub struct Allowances {
    by_line: BTreeMap<usize, AllowDirective>,
}

impl Allowances {
    /// Collects directives from `(start line, comment text)` pairs.
    #[must_use]
    pub fn from_comments<'a>(comments: impl IntoIterator<Item = (usize, &'a str)>) -> Self {
        let by_line = comments
            .into_iter()
            .filter_map(|(line, text)| parse_allow_directive(text).map(|d| (line, d)))
            .collect();
        Self { by_line }
    }

    /// Collects directives from the `comment` nodes of a parsed tree.
    #[must_use]
    pub fn from_tree(tree: &SyntaxTree, source: &str) -> Self {
        Self::from_comments(
            tree.preorder()
                .filter(|&id| tree.kind(id) == "comment")
                .map(|id| (tree.node(id).start.line, tree.text(id, source))),
        )
    }

    /// Returns true if the file has no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Checks whether `rule_id` is allowed at `line` (1-indexed).
    #[must_use]
    pub fn check(&self, line: usize, rule_id: &str) -> AllowCheck {
        for check_line in [line.saturating_sub(1), line] {
            if let Some(directive) = self.by_line.get(&check_line) {
                if directive.rules.contains(rule_id) || directive.rules.contains("all") {
                    return AllowCheck::Allowed {
                        reason: directive.reason.clone(),
                    };
                }
            }
        }
        AllowCheck::Denied
    }
}

/// Parses an allowance directive from the full text of one comment.
fn parse_allow_directive(comment: &str) -> Option<AllowDirective> {
    let comment_content = comment
        .strip_prefix("//")
        .or_else(|| comment.strip_prefix("/*"))?
        .trim_start();

    let directive = comment_content.strip_prefix("guidelint:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules_str = &allow_content[..paren_end];

    let rules: HashSet<String> = rules_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .filter(|r| r.starts_with('"') && r.len() > 1)
        .and_then(|r| r[1..].find('"').map(|end| r[1..=end].to_string()));

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allow_directive() {
        let directive = parse_allow_directive("// guidelint: allow(style/no-var)").unwrap();
        assert!(directive.rules.contains("style/no-var"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn test_parse_allow_directive_with_reason() {
        let directive =
            parse_allow_directive("// guidelint: allow(style/no-var) reason=\"legacy shim\"")
                .unwrap();
        assert!(directive.rules.contains("style/no-var"));
        assert_eq!(directive.reason.as_deref(), Some("legacy shim"));
    }

    #[test]
    fn test_parse_multiple_rules() {
        let directive =
            parse_allow_directive("// guidelint: allow(style/no-var, naming/hook-use-prefix)")
                .unwrap();
        assert!(directive.rules.contains("style/no-var"));
        assert!(directive.rules.contains("naming/hook-use-prefix"));
    }

    #[test]
    fn test_block_comments_and_non_directives() {
        assert!(parse_allow_directive("/* guidelint: allow(react/no-index-as-key) */").is_some());
        assert!(parse_allow_directive("// eslint-disable-line").is_none());
        assert!(parse_allow_directive("// guidelint: allow()").is_none());
    }

    #[test]
    fn test_text_must_start_as_a_comment() {
        assert!(parse_allow_directive("var x = 1; // guidelint: allow(style/no-var)").is_none());
        assert!(parse_allow_directive("\"// guidelint: allow(all)\"").is_none());
    }

    #[test]
    fn test_check_same_and_next_line() {
        let allowances = Allowances::from_comments([(2, "// guidelint: allow(style/no-var)")]);
        assert!(allowances.check(2, "style/no-var").is_allowed());
        assert!(allowances.check(3, "style/no-var").is_allowed());
        assert!(!allowances.check(4, "style/no-var").is_allowed());
        assert!(!allowances.check(3, "style/strict-equality").is_allowed());
    }

    #[test]
    fn test_allow_all() {
        let allowances =
            Allowances::from_comments([(1, "// guidelint: allow(all) reason=\"vendored\"")]);
        let check = allowances.check(1, "style/strict-equality");
        assert!(check.is_allowed());
        assert_eq!(check.reason(), Some("vendored"));
    }

    #[test]
    fn test_check_denied() {
        let allowances = Allowances::from_comments([(1, "// plain note")]);
        assert!(allowances.is_empty());
        let check = allowances.check(1, "style/no-var");
        assert_eq!(check, AllowCheck::Denied);
        assert_eq!(check.reason(), None);
    }
}
