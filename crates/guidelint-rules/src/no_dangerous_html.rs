//! Rule to forbid `dangerouslySetInnerHTML`.
//!
//! Injecting raw HTML bypasses React's escaping and is the usual way
//! cross-site scripting reaches a React application.

use guidelint_core::{Finding, NodeId, Rule, RuleContext};

use crate::js;

/// Rule id for no-dangerous-html.
pub const ID: &str = "react/no-dangerous-html";

/// Forbids the `dangerouslySetInnerHTML` prop.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDangerousHtml;

impl NoDangerousHtml {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoDangerousHtml {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Forbids the `dangerouslySetInnerHTML` prop"
    }

    fn applies_to(&self) -> &'static [&'static str] {
        &["jsx_attribute"]
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Finding> {
        if js::jsx_attribute_name(ctx.tree(), ctx.source(), node) == Some("dangerouslySetInnerHTML")
        {
            vec![ctx.finding(
                node,
                "Avoid `dangerouslySetInnerHTML`; render the content as React elements",
            )]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn check_code(code: &str) -> Vec<Finding> {
        testing::run(NoDangerousHtml::new(), code)
    }

    #[test]
    fn test_detects_dangerous_html() {
        let findings = check_code("const a = <div dangerouslySetInnerHTML={{ __html: html }} />;\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location.column, 16);
    }

    #[test]
    fn test_allows_regular_props() {
        let findings = check_code("const a = <div className=\"x\" title={html}>{html}</div>;\n");
        assert!(findings.is_empty());
    }
}
