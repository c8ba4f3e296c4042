//! JavaScript/JSX parser adapter using Tree-sitter.

use guidelint_core::{ParseError, Position, SourceParser, SyntaxTree};
use tracing::trace;
use tree_sitter::{Language, Node, Parser, Point};

/// Parses `.js`, `.jsx`, `.mjs` and `.cjs` sources.
///
/// A fresh [`Parser`] is created per call, so one `JsParser` can be shared
/// across worker threads.
pub struct JsParser {
    language: Language,
}

impl JsParser {
    /// Creates a new JavaScript parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

impl Default for JsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JsParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsParser").finish_non_exhaustive()
    }
}

impl SourceParser for JsParser {
    fn language_id(&self) -> &'static str {
        "javascript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["js", "jsx", "mjs", "cjs"]
    }

    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language).map_err(|e| {
            ParseError::new(
                format!("failed to load the JavaScript grammar: {e}"),
                Position::new(1, 1),
            )
        })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::new("parser produced no tree", Position::new(1, 1)))?;

        let root = tree.root_node();
        trace!(
            "Parsed {} bytes, has_error={}",
            source.len(),
            root.has_error()
        );
        Ok(convert(root))
    }
}

fn position(point: Point) -> Position {
    Position::new(point.row + 1, point.column + 1)
}

/// Copies the tree-sitter tree in document order, keeping every node
/// (anonymous tokens included) and its field name.
fn convert(root: Node<'_>) -> SyntaxTree {
    let mut builder = SyntaxTree::builder();
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        builder.open(
            node.kind(),
            cursor.field_name(),
            node.is_named(),
            node.is_error() || node.is_missing(),
            node.byte_range(),
            position(node.start_position()),
        );

        if cursor.goto_first_child() {
            continue;
        }
        builder.close();

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return builder.finish();
            }
            builder.close();
        }
    }
}
