//! Rule to require `alt` text on images.
//!
//! # Rationale
//!
//! Screen readers announce an image by its `alt` text. Decorative images
//! still need `alt=""` so they are skipped instead of read out by file name.
//!
//! Elements that spread props (`<img {...props} />`) are not reported,
//! since `alt` may arrive through the spread.

use guidelint_core::{Finding, NodeId, Rule, RuleContext};

use crate::js;

/// Rule id for img-requires-alt.
pub const ID: &str = "markup/img-requires-alt";

/// Requires `<img>` elements to carry an `alt` attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImgRequiresAlt;

impl ImgRequiresAlt {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ImgRequiresAlt {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Requires `<img>` elements to have an `alt` attribute"
    }

    fn applies_to(&self) -> &'static [&'static str] {
        &["jsx_opening_element", "jsx_self_closing_element"]
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let tree = ctx.tree();
        let source = ctx.source();
        if js::jsx_element_name(tree, source, node) != Some("img") {
            return Vec::new();
        }

        let satisfied = tree.children_by_field(node, "attribute").any(|attr| {
            tree.kind(attr) == "jsx_expression"
                || js::jsx_attribute_name(tree, source, attr) == Some("alt")
        });
        if satisfied {
            return Vec::new();
        }

        vec![ctx
            .finding(node, "`<img>` elements must have an `alt` attribute")
            .with_suggestion("add alt=\"\" for decorative images")]
    }
}
