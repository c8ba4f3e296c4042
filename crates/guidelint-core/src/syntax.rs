//! Language-agnostic syntax tree and the parser adapter boundary.
//!
//! The engine never talks to a concrete parser. A [`SourceParser`] turns
//! source text into a [`SyntaxTree`]: an arena of nodes addressed by
//! [`NodeId`], each carrying its kind, its field name in the parent, its
//! byte range and a 1-indexed line/column.

use miette::Diagnostic;

/// Handle to a node inside a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A 1-indexed line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// One node of a [`SyntaxTree`].
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    /// Grammar kind (e.g. `lexical_declaration`, `==`).
    pub kind: &'static str,
    /// Field name this node occupies in its parent, if any.
    pub field: Option<&'static str>,
    /// Whether the node is a named grammar node (as opposed to a token).
    pub named: bool,
    /// Whether the parser flagged this node as an error or missing node.
    pub is_error: bool,
    /// Start byte offset.
    pub start_byte: usize,
    /// End byte offset (exclusive).
    pub end_byte: usize,
    /// Start position.
    pub start: Position,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An immutable syntax tree produced by a [`SourceParser`].
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    /// Creates a builder for assembling a tree in pre-order.
    #[must_use]
    pub fn builder() -> TreeBuilder {
        TreeBuilder::default()
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node behind `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    /// Returns the kind of the node behind `id`.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &'static str {
        self.nodes[id.0].kind
    }

    /// Returns the parent of `id`, or `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Iterates over the ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Returns all children of `id`, tokens included.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Iterates over the named children of `id`, skipping comments.
    pub fn named_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).iter().copied().filter(move |&c| {
            let node = self.node(c);
            node.named && node.kind != "comment"
        })
    }

    /// Returns the first child of `id` stored under `field`.
    #[must_use]
    pub fn child_by_field(&self, id: NodeId, field: &str) -> Option<NodeId> {
        self.children_by_field(id, field).next()
    }

    /// Iterates over all children of `id` stored under `field`.
    pub fn children_by_field<'a>(
        &'a self,
        id: NodeId,
        field: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&c| self.node(c).field == Some(field))
    }

    /// Returns true if `id` has a direct child token or node of `kind`.
    #[must_use]
    pub fn has_child_kind(&self, id: NodeId, kind: &str) -> bool {
        self.children(id).iter().any(|&c| self.kind(c) == kind)
    }

    /// Returns the source text covered by `id`.
    #[must_use]
    pub fn text<'s>(&self, id: NodeId, source: &'s str) -> &'s str {
        let node = self.node(id);
        source.get(node.start_byte..node.end_byte).unwrap_or("")
    }

    /// Iterates over the whole tree in depth-first pre-order.
    pub fn preorder(&self) -> Preorder<'_> {
        self.descendants(self.root())
    }

    /// Iterates over `id` and its descendants in depth-first pre-order.
    pub fn descendants(&self, id: NodeId) -> Preorder<'_> {
        let stack = if self.nodes.is_empty() {
            Vec::new()
        } else {
            vec![id]
        };
        Preorder { tree: self, stack }
    }

    /// Returns the first error or missing node in pre-order, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<NodeId> {
        self.preorder().find(|&id| self.node(id).is_error)
    }
}

/// Depth-first pre-order iterator over a [`SyntaxTree`].
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Incremental builder used by parser adapters.
///
/// Nodes are opened and closed in document order; each opened node becomes a
/// child of the innermost node that is still open.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    /// Opens a node as a child of the innermost open node.
    pub fn open(
        &mut self,
        kind: &'static str,
        field: Option<&'static str>,
        named: bool,
        is_error: bool,
        byte_range: std::ops::Range<usize>,
        start: Position,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.open.last().copied();
        self.nodes.push(SyntaxNode {
            kind,
            field,
            named,
            is_error,
            start_byte: byte_range.start,
            end_byte: byte_range.end,
            start,
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        self.open.push(id);
        id
    }

    /// Closes the innermost open node.
    pub fn close(&mut self) {
        self.open.pop();
    }

    /// Finishes the tree. Nodes still open are closed implicitly.
    #[must_use]
    pub fn finish(self) -> SyntaxTree {
        SyntaxTree { nodes: self.nodes }
    }
}

/// The parser adapter boundary.
///
/// Implementations must attach a line and column to every node and
/// report syntax problems either as error nodes inside the tree or as a
/// [`ParseError`].
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g. `"javascript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` into a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser could not produce a tree at all.
    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError>;
}

/// The parser could not produce a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(guidelint::parse))]
pub struct ParseError {
    /// Human-readable description.
    pub message: String,
    /// Position the error refers to.
    pub position: Position,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}
