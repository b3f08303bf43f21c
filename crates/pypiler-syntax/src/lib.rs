//! Syntax front end for PyPiler.
//!
//! Source text is parsed with tree-sitter's Python grammar and converted into
//! an owned [`SyntaxTree`] whose node kinds form the closed [`NodeKind`] set.
//! The [`SourceLocator`] trait supplies the text of a single function.

pub mod locator;
pub mod parser;
pub mod tree;

pub use locator::{FileLocator, FunctionRef, InlineLocator, SourceLocator};
pub use parser::{PythonParser, SourceParser};
pub use tree::{NodeKind, SyntaxNode, SyntaxTree};
