//! JavaScript syntax queries shared by the rules.

use guidelint_core::utils::naming::is_hook_name;
use guidelint_core::{NodeId, SyntaxTree};

/// Node kinds that introduce a function scope.
pub(crate) const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "function",
    "generator_function",
    "arrow_function",
    "method_definition",
];

/// Function kinds that can be bound to a name by a declaration or variable.
pub(crate) const NAMED_FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "function_expression",
    "function",
    "arrow_function",
];

/// Calls whose first argument is still "the component".
const COMPONENT_WRAPPERS: &[&str] = &["memo", "forwardRef", "React.memo", "React.forwardRef"];

const CLASS_COMPONENT_BASES: &[&str] = &[
    "Component",
    "PureComponent",
    "React.Component",
    "React.PureComponent",
];

pub(crate) fn is_function(kind: &str) -> bool {
    FUNCTION_KINDS.contains(&kind)
}

/// Strips any number of enclosing parentheses.
pub(crate) fn unwrap_parens(tree: &SyntaxTree, mut node: NodeId) -> NodeId {
    while tree.kind(node) == "parenthesized_expression" {
        match tree.named_children(node).next() {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// True for statements directly in the program body (optionally exported).
pub(crate) fn is_top_level(tree: &SyntaxTree, node: NodeId) -> bool {
    match tree.parent(node) {
        Some(p) if tree.kind(p) == "program" => true,
        Some(p) if tree.kind(p) == "export_statement" => tree
            .parent(p)
            .is_some_and(|gp| tree.kind(gp) == "program"),
        _ => false,
    }
}

/// The innermost function containing `node`.
pub(crate) fn enclosing_function(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.ancestors(node).find(|&a| is_function(tree.kind(a)))
}

/// The `variable_declarator` a function expression is assigned by, looking
/// through parentheses and component wrappers like `memo(...)`.
pub(crate) fn binding_declarator(tree: &SyntaxTree, source: &str, func: NodeId) -> Option<NodeId> {
    let mut current = func;
    loop {
        let parent = tree.parent(current)?;
        match tree.kind(parent) {
            "parenthesized_expression" => current = parent,
            "arguments" => {
                let call = tree.parent(parent)?;
                let callee = tree.child_by_field(call, "function")?;
                let first_arg = tree.named_children(parent).next()?;
                if first_arg != current || !COMPONENT_WRAPPERS.contains(&tree.text(callee, source))
                {
                    return None;
                }
                current = call;
            }
            "variable_declarator" => {
                return (tree.child_by_field(parent, "value") == Some(current)).then_some(parent);
            }
            _ => return None,
        }
    }
}

/// The identifier naming a function: its variable binding if any, else its
/// own `name` field.
pub(crate) fn function_name(tree: &SyntaxTree, source: &str, func: NodeId) -> Option<NodeId> {
    binding_declarator(tree, source, func)
        .and_then(|d| tree.child_by_field(d, "name"))
        .or_else(|| tree.child_by_field(func, "name"))
        .filter(|&n| matches!(tree.kind(n), "identifier" | "property_identifier"))
}

/// Whether a function is declared at module scope, either as a declaration
/// or as the value of a top-level `const`/`let`.
pub(crate) fn is_module_scope_function(tree: &SyntaxTree, source: &str, func: NodeId) -> bool {
    if tree.kind(func) == "function_declaration" {
        return is_top_level(tree, func);
    }
    binding_declarator(tree, source, func)
        .and_then(|d| tree.parent(d))
        .is_some_and(|decl| tree.kind(decl) == "lexical_declaration" && is_top_level(tree, decl))
}

/// Whether an expression evaluates to JSX, looking through parentheses,
/// conditionals and `&&`/`||`/`??`.
pub(crate) fn is_jsx(tree: &SyntaxTree, expr: NodeId) -> bool {
    let expr = unwrap_parens(tree, expr);
    match tree.kind(expr) {
        "jsx_element" | "jsx_self_closing_element" | "jsx_fragment" => true,
        "ternary_expression" => ["consequence", "alternative"]
            .iter()
            .filter_map(|f| tree.child_by_field(expr, f))
            .any(|branch| is_jsx(tree, branch)),
        "binary_expression" => {
            let logical = tree
                .child_by_field(expr, "operator")
                .is_some_and(|op| matches!(tree.kind(op), "&&" | "||" | "??"));
            logical
                && tree
                    .child_by_field(expr, "right")
                    .is_some_and(|right| is_jsx(tree, right))
        }
        _ => false,
    }
}

/// Whether a function returns JSX from its own body.
pub(crate) fn returns_jsx(tree: &SyntaxTree, func: NodeId) -> bool {
    let Some(body) = tree.child_by_field(func, "body") else {
        return false;
    };
    if tree.kind(body) != "statement_block" {
        return is_jsx(tree, body);
    }
    tree.descendants(body).any(|n| {
        tree.kind(n) == "return_statement"
            && enclosing_function(tree, n) == Some(func)
            && tree
                .named_children(n)
                .next()
                .is_some_and(|value| is_jsx(tree, value))
    })
}

/// Whether `call` invokes a hook: `useX(...)` or `React.useX(...)`.
pub(crate) fn is_hook_call(tree: &SyntaxTree, source: &str, call: NodeId) -> bool {
    let Some(callee) = tree.child_by_field(call, "function") else {
        return false;
    };
    match tree.kind(callee) {
        "identifier" => is_hook_name(tree.text(callee, source)),
        "member_expression" => {
            let object = tree.child_by_field(callee, "object");
            let property = tree.child_by_field(callee, "property");
            object.is_some_and(|o| tree.text(o, source) == "React")
                && property.is_some_and(|p| is_hook_name(tree.text(p, source)))
        }
        _ => false,
    }
}

/// Whether a function calls a hook directly, not from a nested function.
pub(crate) fn calls_hook(tree: &SyntaxTree, source: &str, func: NodeId) -> bool {
    let Some(body) = tree.child_by_field(func, "body") else {
        return false;
    };
    tree.descendants(body).any(|n| {
        tree.kind(n) == "call_expression"
            && enclosing_function(tree, n) == Some(func)
            && is_hook_call(tree, source, n)
    })
}

/// Whether a class extends `Component` or `PureComponent`.
pub(crate) fn extends_react_component(tree: &SyntaxTree, source: &str, class: NodeId) -> bool {
    tree.named_children(class)
        .filter(|&c| tree.kind(c) == "class_heritage")
        .flat_map(|h| tree.named_children(h))
        .any(|base| CLASS_COMPONENT_BASES.contains(&tree.text(base, source)))
}

/// Parameters of a function, in order.
pub(crate) fn parameters(tree: &SyntaxTree, func: NodeId) -> Vec<NodeId> {
    if let Some(list) = tree.child_by_field(func, "parameters") {
        return tree.named_children(list).collect();
    }
    tree.child_by_field(func, "parameter").into_iter().collect()
}

/// Name of a JSX attribute (`key` in `key={...}`).
pub(crate) fn jsx_attribute_name<'s>(
    tree: &SyntaxTree,
    source: &'s str,
    attribute: NodeId,
) -> Option<&'s str> {
    tree.named_children(attribute)
        .next()
        .map(|name| tree.text(name, source))
}

/// Value of a JSX attribute, if it has one.
pub(crate) fn jsx_attribute_value(tree: &SyntaxTree, attribute: NodeId) -> Option<NodeId> {
    tree.named_children(attribute).nth(1)
}

/// Tag name of a JSX opening or self-closing element.
pub(crate) fn jsx_element_name<'s>(
    tree: &SyntaxTree,
    source: &'s str,
    element: NodeId,
) -> Option<&'s str> {
    tree.child_by_field(element, "name")
        .map(|name| tree.text(name, source))
}
