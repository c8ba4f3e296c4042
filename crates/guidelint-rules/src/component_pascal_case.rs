//! Rule to require `PascalCase` component names.
//!
//! # Rationale
//!
//! JSX treats lowercase tags as host elements: `<card />` renders a DOM
//! element named `card`, not the `card` component. Components must be
//! `PascalCase` to be usable from JSX at all.
//!
//! # Detected Patterns
//!
//! At module scope only:
//!
//! - Function declarations that return JSX
//! - `const`/`let` bindings of arrows or function expressions that return
//!   JSX, including through `memo(...)` and `forwardRef(...)`
//! - Classes extending `Component` or `PureComponent`

use guidelint_core::utils::naming::{is_pascal_case, to_pascal_case};
use guidelint_core::{Finding, NodeId, Rule, RuleContext};

use crate::js;

/// Rule id for component-pascal-case.
pub const ID: &str = "naming/component-pascal-case";

/// Requires React components to be named in `PascalCase`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentPascalCase;

impl ComponentPascalCase {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn component_name(node: NodeId, ctx: &RuleContext<'_>) -> Option<NodeId> {
        let tree = ctx.tree();
        if ctx.kind(node) == "class_declaration" {
            return (js::is_top_level(tree, node)
                && js::extends_react_component(tree, ctx.source(), node))
            .then(|| tree.child_by_field(node, "name"))
            .flatten();
        }

        if !js::is_module_scope_function(tree, ctx.source(), node) || !js::returns_jsx(tree, node)
        {
            return None;
        }
        js::function_name(tree, ctx.source(), node)
    }
}

impl Rule for ComponentPascalCase {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Requires React component names to be PascalCase"
    }

    fn applies_to(&self) -> &'static [&'static str] {
        &[
            "function_declaration",
            "function_expression",
            "function",
            "arrow_function",
            "class_declaration",
        ]
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let Some(name) = Self::component_name(node, ctx) else {
            return Vec::new();
        };
        let text = ctx.text(name);
        if is_pascal_case(text) {
            return Vec::new();
        }

        let suggested = to_pascal_case(text);
        vec![ctx
            .finding(
                name,
                format!("Component `{text}` should be PascalCase (`{suggested}`)"),
            )
            .with_suggestion(suggested)]
    }
}
