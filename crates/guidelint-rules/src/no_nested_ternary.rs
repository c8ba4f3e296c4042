//! Rule to forbid nested conditional expressions.
//!
//! `a ? b : c ? d : e` reads as a puzzle; an `if` chain or a lookup
//! table reads as a decision.

use guidelint_core::{Finding, NodeId, Rule, RuleContext};

use crate::js;

/// Rule id for no-nested-ternary.
pub const ID: &str = "style/no-nested-ternary";

/// Forbids a ternary expression in a branch of another ternary.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNestedTernary;

impl NoNestedTernary {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoNestedTernary {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Forbids nesting a ternary expression inside another ternary's branch"
    }

    fn applies_to(&self) -> &'static [&'static str] {
        &["ternary_expression"]
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let tree = ctx.tree();
        let nested = ["consequence", "alternative"]
            .iter()
            .filter_map(|f| tree.child_by_field(node, f))
            .any(|branch| tree.kind(js::unwrap_parens(tree, branch)) == "ternary_expression");

        if nested {
            vec![ctx.finding(
                node,
                "Avoid nested ternary expressions; use `if` statements or a lookup instead",
            )]
        } else {
            Vec::new()
        }
    }
}
