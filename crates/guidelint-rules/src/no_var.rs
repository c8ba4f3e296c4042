//! Rule to forbid `var` declarations.
//!
//! # Rationale
//!
//! `var` is function-scoped and hoisted, which makes the lifetime of a
//! binding hard to read off the code. `let` and `const` are block-scoped.
//!
//! # Detected Patterns
//!
//! - `var x = 1;`
//! - `for (var i = 0; ...)`
//! - `for (var key in object)`

use guidelint_core::{Finding, NodeId, Rule, RuleContext, Severity};

/// Rule id for no-var.
pub const ID: &str = "style/no-var";

const MESSAGE: &str = "Use `let` or `const` instead of `var`";

/// Forbids `var` declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVar;

impl NoVar {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoVar {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Forbids `var` declarations in favour of `let` and `const`"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn applies_to(&self) -> &'static [&'static str] {
        &["variable_declaration", "for_in_statement"]
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let tree = ctx.tree();
        match ctx.kind(node) {
            "variable_declaration" => vec![ctx.finding(node, MESSAGE)],
            _ => tree
                .children(node)
                .iter()
                .find(|&&c| tree.kind(c) == "var")
                .map(|&var| ctx.finding(var, MESSAGE))
                .into_iter()
                .collect(),
        }
    }
}
