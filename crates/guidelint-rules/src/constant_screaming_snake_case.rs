//! Rule to require `SCREAMING_SNAKE_CASE` for module-level constants.
//!
//! # Rationale
//!
//! A module-level `const` bound to a primitive literal is configuration
//! baked into the code. Naming it in `SCREAMING_SNAKE_CASE` makes such
//! values stand out from ordinary bindings.
//!
//! # Detected Patterns
//!
//! Top-level `const` declarations whose initializer is a string, template
//! string without substitutions, number (optionally negated), boolean or
//! `null` literal.
//!
//! # Configuration
//!
//! - `ignore`: Names that are never reported (default: none)

use guidelint_core::utils::naming::{is_screaming_snake_case, to_screaming_snake_case};
use guidelint_core::{Finding, NodeId, Rule, RuleContext, RuleOptions, SyntaxTree};

use crate::js;

/// Rule id for constant-screaming-snake-case.
pub const ID: &str = "naming/constant-screaming-snake-case";

/// Requires module-level literal constants to be `SCREAMING_SNAKE_CASE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantScreamingSnakeCase;

impl ConstantScreamingSnakeCase {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_primitive_literal(tree: &SyntaxTree, node: NodeId) -> bool {
    let node = js::unwrap_parens(tree, node);
    match tree.kind(node) {
        "string" | "number" | "true" | "false" | "null" => true,
        "template_string" => !tree.has_child_kind(node, "template_substitution"),
        "unary_expression" => {
            let negated = tree
                .child_by_field(node, "operator")
                .is_some_and(|op| matches!(tree.kind(op), "-" | "+"));
            negated
                && tree
                    .child_by_field(node, "argument")
                    .is_some_and(|arg| tree.kind(arg) == "number")
        }
        _ => false,
    }
}

impl Rule for ConstantScreamingSnakeCase {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Requires module-level literal constants to be SCREAMING_SNAKE_CASE"
    }

    fn applies_to(&self) -> &'static [&'static str] {
        &["lexical_declaration"]
    }

    fn validate_options(&self, options: &RuleOptions) -> Result<(), String> {
        options.ensure_only(&["ignore"])?;
        match options.get("ignore") {
            Some(value)
                if !value
                    .as_array()
                    .is_some_and(|items| items.iter().all(|v| v.is_str())) =>
            {
                Err("`ignore` must be an array of strings".to_string())
            }
            _ => Ok(()),
        }
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let tree = ctx.tree();
        if !tree.has_child_kind(node, "const") || !js::is_top_level(tree, node) {
            return Vec::new();
        }
        let ignored = ctx.options().get_str_array("ignore");

        tree.named_children(node)
            .filter(|&d| tree.kind(d) == "variable_declarator")
            .filter(|&d| {
                tree.child_by_field(d, "value")
                    .is_some_and(|value| is_primitive_literal(tree, value))
            })
            .filter_map(|d| tree.child_by_field(d, "name"))
            .filter(|&name| tree.kind(name) == "identifier")
            .filter_map(|name| {
                let text = ctx.text(name);
                if is_screaming_snake_case(text) || ignored.iter().any(|i| i == text) {
                    return None;
                }
                let suggested = to_screaming_snake_case(text);
                Some(
                    ctx.finding(
                        name,
                        format!("Constant `{text}` should be SCREAMING_SNAKE_CASE (`{suggested}`)"),
                    )
                    .with_suggestion(suggested),
                )
            })
            .collect()
    }
}
