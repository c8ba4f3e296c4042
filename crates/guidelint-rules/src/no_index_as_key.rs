//! Rule to forbid the array index as a React `key`.
//!
//! # Rationale
//!
//! A key derived from the position of an item changes whenever the list is
//! reordered, filtered or prepended to. React then reuses the wrong
//! component instances and their state. Keys must come from the item.
//!
//! # Detected Patterns
//!
//! ```jsx
//! items.map((item, index) => <li key={index}>{item.name}</li>)
//! items.map((item, i) => <li key={`row-${i}`} />)
//! ```
//!
//! # Configuration
//!
//! - `iterators`: Array methods whose callbacks render lists
//!   (default: `map`, `flatMap`, `forEach`)

use guidelint_core::{Finding, NodeId, Rule, RuleContext, RuleOptions, SyntaxTree};

use crate::js;

/// Rule id for no-index-as-key.
pub const ID: &str = "react/no-index-as-key";

const DEFAULT_ITERATORS: &[&str] = &["map", "flatMap", "forEach"];

/// Forbids using the list-callback index parameter as a JSX `key`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIndexAsKey;

impl NoIndexAsKey {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Identifiers a key expression is built from directly.
fn key_identifiers(tree: &SyntaxTree, source: &str, expr: NodeId) -> Vec<String> {
    let expr = js::unwrap_parens(tree, expr);
    match tree.kind(expr) {
        "identifier" => vec![tree.text(expr, source).to_string()],
        "template_string" => tree
            .named_children(expr)
            .filter(|&c| tree.kind(c) == "template_substitution")
            .filter_map(|sub| tree.named_children(sub).next())
            .flat_map(|inner| key_identifiers(tree, source, inner))
            .collect(),
        "binary_expression" => ["left", "right"]
            .iter()
            .filter_map(|f| tree.child_by_field(expr, f))
            .flat_map(|side| key_identifiers(tree, source, side))
            .collect(),
        _ => Vec::new(),
    }
}

/// Whether `func` is the callback of `receiver.<iterator>(...)`.
fn is_iterator_callback(
    tree: &SyntaxTree,
    source: &str,
    func: NodeId,
    iterators: &[String],
) -> bool {
    let Some(args) = tree.parent(func).filter(|&p| tree.kind(p) == "arguments") else {
        return false;
    };
    let Some(call) = tree.parent(args) else {
        return false;
    };
    tree.child_by_field(call, "function")
        .filter(|&callee| tree.kind(callee) == "member_expression")
        .and_then(|callee| tree.child_by_field(callee, "property"))
        .is_some_and(|property| iterators.iter().any(|i| i == tree.text(property, source)))
}

impl Rule for NoIndexAsKey {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Forbids using the array index of a list callback as a React key"
    }

    fn applies_to(&self) -> &'static [&'static str] {
        &["jsx_attribute"]
    }

    fn validate_options(&self, options: &RuleOptions) -> Result<(), String> {
        options.ensure_only(&["iterators"])?;
        match options.get("iterators") {
            Some(value)
                if !value
                    .as_array()
                    .is_some_and(|items| items.iter().all(|v| v.is_str())) =>
            {
                Err("`iterators` must be an array of strings".to_string())
            }
            _ => Ok(()),
        }
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let tree = ctx.tree();
        let source = ctx.source();
        if js::jsx_attribute_name(tree, source, node) != Some("key") {
            return Vec::new();
        }
        let Some(value) = js::jsx_attribute_value(tree, node)
            .filter(|&v| tree.kind(v) == "jsx_expression")
            .and_then(|v| tree.named_children(v).next())
        else {
            return Vec::new();
        };

        let mut iterators = ctx.options().get_str_array("iterators");
        if ctx.options().get("iterators").is_none() {
            iterators = DEFAULT_ITERATORS.iter().map(ToString::to_string).collect();
        }

        for name in key_identifiers(tree, source, value) {
            // The innermost function declaring the name decides what it refers to.
            let declaring = tree
                .ancestors(node)
                .filter(|&a| js::is_function(tree.kind(a)))
                .find_map(|func| {
                    js::parameters(tree, func)
                        .iter()
                        .position(|&p| tree.kind(p) == "identifier" && tree.text(p, source) == name)
                        .map(|index| (func, index))
                });

            if let Some((func, 1)) = declaring {
                if is_iterator_callback(tree, source, func, &iterators) {
                    return vec![ctx.finding(
                        node,
                        format!(
                            "Do not use the array index `{name}` as a key; use a stable id from the item"
                        ),
                    )];
                }
            }
        }
        Vec::new()
    }
}
