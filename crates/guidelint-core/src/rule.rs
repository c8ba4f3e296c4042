//! Rule trait for defining lint rules.

use crate::config::RuleOptions;
use crate::context::RuleContext;
use crate::syntax::NodeId;
use crate::types::{Finding, Severity};

/// Reserved id of the engine's own syntax-error finding.
///
/// No registered rule may use it.
pub const PARSE_ERROR_ID: &str = "parse-error";

/// A stateless check over syntax nodes of particular kinds.
///
/// The engine calls [`Rule::check`] once for every node whose kind is listed
/// in [`Rule::applies_to`]. Rules never see a mutable tree and must not keep
/// state between calls; anything configurable arrives through
/// [`RuleContext::options`].
///
/// # Example
///
/// ```ignore
/// use guidelint_core::{Finding, NodeId, Rule, RuleContext};
///
/// pub struct NoDebugger;
///
/// impl Rule for NoDebugger {
///     fn id(&self) -> &'static str { "style/no-debugger" }
///     fn applies_to(&self) -> &'static [&'static str] { &["debugger_statement"] }
///
///     fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Finding> {
///         vec![ctx.finding(node, "Remove `debugger` statements")]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the unique id of this rule (e.g., `style/no-var`).
    fn id(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for findings from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Returns the node kinds this rule wants to see.
    fn applies_to(&self) -> &'static [&'static str];

    /// Validates rule-specific options before analysis starts.
    ///
    /// The default accepts no options at all.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message describing the bad option.
    fn validate_options(&self, options: &RuleOptions) -> Result<(), String> {
        options.ensure_only(&[])
    }

    /// Checks a single node and returns any findings.
    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Finding>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
