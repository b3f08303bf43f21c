//! Error types and result aliases for PyPiler.

use std::fmt;

use crate::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main error type shared by all stages.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    #[diagnostic(code(pypiler::parser))]
    Parse(String, #[label("here")] Span),

    #[error("Source lookup error: {0}")]
    Locate(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lowering(#[from] LoweringError),
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from(span.start.offset..span.end.offset)
    }
}

/// Result type alias using the PyPiler error type.
pub type Result<T> = std::result::Result<T, Error>;

/// A rejected lowering, pinned to the syntax node that caused it.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("{kind} at {}:{}", .span.start.line, .span.start.column)]
#[diagnostic(code(pypiler::lowering))]
pub struct LoweringError {
    pub kind: LoweringErrorKind,
    #[label("here")]
    pub span: Span,
}

impl LoweringError {
    #[must_use]
    pub const fn new(kind: LoweringErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    #[must_use]
    pub const fn unsupported(construct: Construct, span: Span) -> Self {
        Self::new(LoweringErrorKind::UnsupportedConstruct(construct), span)
    }

    /// Line of the offending node (1-based).
    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.start.line
    }

    /// Column of the offending node (1-based).
    #[must_use]
    pub const fn column(&self) -> usize {
        self.span.start.column
    }
}

/// Categories of lowering failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoweringErrorKind {
    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(Construct),

    /// Carries an S-expression dump of the rejected node.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// Carries an S-expression dump of the rejected node.
    #[error("unsupported statement: {0}")]
    UnsupportedStatement(String),

    #[error("undefined reference to `{0}`")]
    UndefinedReference(String),

    #[error("`{0}` is already bound and cannot be assigned again")]
    SingleAssignmentViolation(String),

    #[error("operand `{0}` is bound more than once")]
    DuplicateOperand(String),

    #[error("operator `{0}` is already defined")]
    Redefinition(String),

    #[error("graph invariant violated: {0}")]
    InvalidGraph(String),
}

/// Syntax categories that are recognized but deliberately not lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    CollectionLiteral,
    Lambda,
    FormattedString,
    PositionalArgument,
    ComputedCallee,
    ChainedComparison,
    EarlyReturn,
    NestedDefinition,
    ClassDefinition,
    Decorator,
    AsyncFunction,
    ReturnAnnotation,
    If,
    Match,
    For,
    While,
    Break,
    Continue,
    Try,
    Raise,
    With,
    TypedParameter,
    DefaultParameter,
    VariadicParameter,
    KeywordVariadicParameter,
    ParameterSeparator,
    AssignmentTarget,
    AssignmentArity,
    AnnotatedAssignment,
    ChainedAssignment,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CollectionLiteral => "collection literal",
            Self::Lambda => "lambda",
            Self::FormattedString => "formatted string",
            Self::PositionalArgument => "positional argument",
            Self::ComputedCallee => "computed callee",
            Self::ChainedComparison => "chained comparison",
            Self::EarlyReturn => "early return",
            Self::NestedDefinition => "nested function definition",
            Self::ClassDefinition => "class definition",
            Self::Decorator => "decorator",
            Self::AsyncFunction => "async function",
            Self::ReturnAnnotation => "return type annotation",
            Self::If => "if statement",
            Self::Match => "match statement",
            Self::For => "for loop",
            Self::While => "while loop",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Try => "try statement",
            Self::Raise => "raise statement",
            Self::With => "with statement",
            Self::TypedParameter => "typed parameter",
            Self::DefaultParameter => "default parameter",
            Self::VariadicParameter => "variadic parameter",
            Self::KeywordVariadicParameter => "keyword variadic parameter",
            Self::ParameterSeparator => "parameter separator",
            Self::AssignmentTarget => "non-name assignment target",
            Self::AssignmentArity => "assignment arity mismatch",
            Self::AnnotatedAssignment => "annotated assignment",
            Self::ChainedAssignment => "chained assignment",
        };
        write!(f, "{name}")
    }
}
