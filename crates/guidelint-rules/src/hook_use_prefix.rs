//! Rule to require the `use` prefix on custom hooks.
//!
//! # Rationale
//!
//! React relies on the `use` prefix to know which functions follow the
//! rules of hooks. A function that calls hooks but is not a component is a
//! custom hook and must be named `useSomething`.
//!
//! # Detected Patterns
//!
//! Named functions (declarations, or arrows and function expressions bound
//! to a variable) that call `useX(...)` or `React.useX(...)` directly in
//! their own body and do not return JSX.
//!
//! `PascalCase` functions are treated as components even when they return
//! something other than JSX (`null`, `props.children`).

use guidelint_core::utils::naming::{is_hook_name, is_pascal_case, to_hook_name};
use guidelint_core::{Finding, NodeId, Rule, RuleContext};

use crate::js;

/// Rule id for hook-use-prefix.
pub const ID: &str = "naming/hook-use-prefix";

/// Requires custom hooks to be named with a `use` prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct HookUsePrefix;

impl HookUsePrefix {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for HookUsePrefix {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Requires functions that call hooks (and are not components) to start with `use`"
    }

    fn applies_to(&self) -> &'static [&'static str] {
        js::NAMED_FUNCTION_KINDS
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let tree = ctx.tree();
        let Some(name) = js::function_name(tree, ctx.source(), node) else {
            return Vec::new();
        };
        let text = ctx.text(name);
        if is_hook_name(text) || is_pascal_case(text) {
            return Vec::new();
        }
        if !js::calls_hook(tree, ctx.source(), node) || js::returns_jsx(tree, node) {
            return Vec::new();
        }

        let suggested = to_hook_name(text);
        vec![ctx
            .finding(
                name,
                format!("`{text}` calls hooks and should be named with a `use` prefix (`{suggested}`)"),
            )
            .with_suggestion(suggested)]
    }
}
