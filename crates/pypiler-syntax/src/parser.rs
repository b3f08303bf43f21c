//! Parsing of Python source text into [`SyntaxTree`]s with tree-sitter.

use pypiler_core::{Error, Location, Result, Span};
use tree_sitter::{Node, Parser};

use crate::tree::{NodeKind, SyntaxNode, SyntaxTree};

/// Turns source text into a syntax tree.
pub trait SourceParser {
    /// Parses `source` into a syntax tree.
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if the text is not syntactically valid.
    fn parse(&self, source: &str) -> Result<SyntaxTree>;
}

/// tree-sitter backed parser for Python.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonParser;

impl PythonParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SourceParser for PythonParser {
    fn parse(&self, source: &str) -> Result<SyntaxTree> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::language())
            .map_err(|e| {
                Error::Parse(
                    format!("failed to load the Python grammar: {e}"),
                    Span::from_range(0, 0),
                )
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse("parser produced no tree".into(), Span::from_range(0, 0)))?;

        let root = tree.root_node();
        if root.has_error() {
            let culprit = first_error(root).unwrap_or(root);
            let message = if culprit.is_missing() {
                format!("missing `{}`", culprit.kind())
            } else {
                format!("unexpected `{}`", node_text(culprit, source).trim())
            };
            return Err(Error::Parse(message, node_span(culprit)));
        }

        tracing::trace!(bytes = source.len(), "parsed Python source");

        Ok(SyntaxTree {
            source: source.to_string(),
            root: convert(root, None, source),
        })
    }
}

/// Depth-first search for the first error or missing node.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}

fn convert(node: Node<'_>, field: Option<&'static str>, source: &str) -> SyntaxNode {
    let mut children = Vec::new();
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if !child.is_extra() {
                children.push(convert(child, cursor.field_name(), source));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    SyntaxNode {
        kind: NodeKind::from_grammar(node.kind(), node.is_named()),
        field,
        text: node_text(node, source).to_string(),
        span: node_span(node),
        children,
    }
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

fn node_span(node: Node<'_>) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span::new(
        Location::with_offset(start.row + 1, start.column + 1, node.start_byte()),
        Location::with_offset(end.row + 1, end.column + 1, node.end_byte()),
    )
}
