//! Rule to require strict equality operators.
//!
//! # Rationale
//!
//! `==` and `!=` apply type coercion (`0 == ""` is true). `===` and `!==`
//! compare without coercion and say what they mean.

use guidelint_core::{Finding, NodeId, Rule, RuleContext, Severity};

/// Rule id for strict-equality.
pub const ID: &str = "style/strict-equality";

/// Requires `===`/`!==` instead of `==`/`!=`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictEquality;

impl StrictEquality {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for StrictEquality {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Requires `===` and `!==` instead of `==` and `!=`"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn applies_to(&self) -> &'static [&'static str] {
        &["binary_expression"]
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let Some(operator) = ctx.tree().child_by_field(node, "operator") else {
            return Vec::new();
        };
        let strict = match ctx.kind(operator) {
            "==" => "===",
            "!=" => "!==",
            _ => return Vec::new(),
        };

        vec![ctx
            .finding(
                node,
                format!("Use `{strict}` instead of `{}`", ctx.kind(operator)),
            )
            .with_suggestion(strict)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn check_code(code: &str) -> Vec<Finding> {
        testing::run(StrictEquality::new(), code)
    }

    #[test]
    fn test_detects_loose_equality() {
        let findings = check_code("if (a == b) {}\nif (a != null) {}\n");
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].message, "Use `===` instead of `==`");
        assert_eq!(findings[0].location.column, 5);
        assert_eq!(findings[1].message, "Use `!==` instead of `!=`");
        assert_eq!(findings[1].suggestion.as_deref(), Some("!=="));
    }

    #[test]
    fn test_allows_strict_equality_and_other_operators() {
        let findings = check_code("const ok = a === b && c !== d && e < f && g + h > 1;\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_nested_comparisons_each_reported() {
        let findings = check_code("const same = (a == b) == c;\n");
        assert_eq!(findings.len(), 2);
    }
}
