//! Rule to limit the number of positional parameters.
//!
//! # Rationale
//!
//! Call sites of functions with many positional parameters are hard to read
//! and easy to get wrong. Past a handful of parameters, a single
//! configuration object names every argument at the call site.
//!
//! # Configuration
//!
//! - `max`: Maximum number of parameters (default: 3)

use guidelint_core::{Finding, NodeId, Rule, RuleContext, RuleOptions};

use crate::js;

/// Rule id for max-arguments.
pub const ID: &str = "complexity/max-arguments";

/// Default parameter limit.
pub const DEFAULT_MAX: i64 = 3;

/// Limits the number of parameters of functions, arrows and methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxArguments;

impl MaxArguments {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MaxArguments {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Limits positional parameters; suggests a configuration object instead"
    }

    fn applies_to(&self) -> &'static [&'static str] {
        js::FUNCTION_KINDS
    }

    fn validate_options(&self, options: &RuleOptions) -> Result<(), String> {
        options.ensure_only(&["max"])?;
        match options.get("max") {
            None => Ok(()),
            Some(value) => match value.as_integer() {
                Some(max) if max >= 0 => Ok(()),
                _ => Err(format!("`max` must be a non-negative integer, got `{value}`")),
            },
        }
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let tree = ctx.tree();
        let count = js::parameters(tree, node).len();
        let max = usize::try_from(ctx.options().get_int("max", DEFAULT_MAX)).unwrap_or(0);
        if count <= max {
            return Vec::new();
        }

        let subject = js::function_name(tree, ctx.source(), node)
            .map_or_else(|| "Function".to_string(), |n| format!("`{}`", ctx.text(n)));
        vec![ctx
            .finding(
                node,
                format!("{subject} has {count} parameters (max {max})"),
            )
            .with_suggestion("pass a single configuration object instead")]
    }
}
