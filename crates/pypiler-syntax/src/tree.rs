//! Owned syntax tree handed to the lowering stage.

use std::fmt::Write as _;

use pypiler_core::Span;

/// Node kinds of the Python grammar that the lowering stage distinguishes.
///
/// Kinds the grammar produces but that are not listed here end up in
/// [`NodeKind::Other`]; anonymous tokens (operators, keywords, punctuation)
/// are [`NodeKind::Token`] carrying the grammar symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Module,

    // Definitions and parameters
    FunctionDefinition,
    DecoratedDefinition,
    ClassDefinition,
    Parameters,
    TypedParameter,
    DefaultParameter,
    TypedDefaultParameter,
    ListSplatPattern,
    DictionarySplatPattern,
    KeywordSeparator,
    PositionalSeparator,
    Type,
    Block,

    // Statements
    ExpressionStatement,
    Assignment,
    AugmentedAssignment,
    PatternList,
    ExpressionList,
    ReturnStatement,
    PassStatement,
    IfStatement,
    MatchStatement,
    ForStatement,
    WhileStatement,
    BreakStatement,
    ContinueStatement,
    TryStatement,
    RaiseStatement,
    WithStatement,

    // Expressions
    Identifier,
    Call,
    ArgumentList,
    KeywordArgument,
    UnaryOperator,
    NotOperator,
    BinaryOperator,
    BooleanOperator,
    ComparisonOperator,
    ConditionalExpression,
    ParenthesizedExpression,
    Lambda,

    // Literals
    Integer,
    Float,
    True,
    False,
    None,
    String,
    ConcatenatedString,
    Interpolation,
    Ellipsis,

    // Collections
    Tuple,
    List,
    Set,
    Dictionary,
    ListComprehension,
    SetComprehension,
    DictionaryComprehension,
    GeneratorExpression,
    ListSplat,
    DictionarySplat,

    /// Anonymous token, e.g. `+`, `not in`, `=`, `(`.
    Token(String),
    Other(String),
}

impl NodeKind {
    /// Maps a grammar node kind onto the closed set of kinds.
    #[must_use]
    pub fn from_grammar(kind: &str, named: bool) -> Self {
        if !named {
            return Self::Token(kind.to_string());
        }

        match kind {
            "module" => Self::Module,
            "function_definition" => Self::FunctionDefinition,
            "decorated_definition" => Self::DecoratedDefinition,
            "class_definition" => Self::ClassDefinition,
            "parameters" => Self::Parameters,
            "typed_parameter" => Self::TypedParameter,
            "default_parameter" => Self::DefaultParameter,
            "typed_default_parameter" => Self::TypedDefaultParameter,
            "list_splat_pattern" => Self::ListSplatPattern,
            "dictionary_splat_pattern" => Self::DictionarySplatPattern,
            "keyword_separator" => Self::KeywordSeparator,
            "positional_separator" => Self::PositionalSeparator,
            "type" => Self::Type,
            "block" => Self::Block,
            "expression_statement" => Self::ExpressionStatement,
            "assignment" => Self::Assignment,
            "augmented_assignment" => Self::AugmentedAssignment,
            "pattern_list" => Self::PatternList,
            "expression_list" => Self::ExpressionList,
            "return_statement" => Self::ReturnStatement,
            "pass_statement" => Self::PassStatement,
            "if_statement" => Self::IfStatement,
            "match_statement" => Self::MatchStatement,
            "for_statement" => Self::ForStatement,
            "while_statement" => Self::WhileStatement,
            "break_statement" => Self::BreakStatement,
            "continue_statement" => Self::ContinueStatement,
            "try_statement" => Self::TryStatement,
            "raise_statement" => Self::RaiseStatement,
            "with_statement" => Self::WithStatement,
            "identifier" => Self::Identifier,
            "call" => Self::Call,
            "argument_list" => Self::ArgumentList,
            "keyword_argument" => Self::KeywordArgument,
            "unary_operator" => Self::UnaryOperator,
            "not_operator" => Self::NotOperator,
            "binary_operator" => Self::BinaryOperator,
            "boolean_operator" => Self::BooleanOperator,
            "comparison_operator" => Self::ComparisonOperator,
            "conditional_expression" => Self::ConditionalExpression,
            "parenthesized_expression" => Self::ParenthesizedExpression,
            "lambda" => Self::Lambda,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "true" => Self::True,
            "false" => Self::False,
            "none" => Self::None,
            "string" => Self::String,
            "concatenated_string" => Self::ConcatenatedString,
            "interpolation" => Self::Interpolation,
            "ellipsis" => Self::Ellipsis,
            "tuple" => Self::Tuple,
            "list" => Self::List,
            "set" => Self::Set,
            "dictionary" => Self::Dictionary,
            "list_comprehension" => Self::ListComprehension,
            "set_comprehension" => Self::SetComprehension,
            "dictionary_comprehension" => Self::DictionaryComprehension,
            "generator_expression" => Self::GeneratorExpression,
            "list_splat" | "parenthesized_list_splat" => Self::ListSplat,
            "dictionary_splat" => Self::DictionarySplat,
            other => Self::Other(other.to_string()),
        }
    }

    /// Name of the kind as the grammar spells it.
    #[must_use]
    pub fn grammar_name(&self) -> &str {
        match self {
            Self::Module => "module",
            Self::FunctionDefinition => "function_definition",
            Self::DecoratedDefinition => "decorated_definition",
            Self::ClassDefinition => "class_definition",
            Self::Parameters => "parameters",
            Self::TypedParameter => "typed_parameter",
            Self::DefaultParameter => "default_parameter",
            Self::TypedDefaultParameter => "typed_default_parameter",
            Self::ListSplatPattern => "list_splat_pattern",
            Self::DictionarySplatPattern => "dictionary_splat_pattern",
            Self::KeywordSeparator => "keyword_separator",
            Self::PositionalSeparator => "positional_separator",
            Self::Type => "type",
            Self::Block => "block",
            Self::ExpressionStatement => "expression_statement",
            Self::Assignment => "assignment",
            Self::AugmentedAssignment => "augmented_assignment",
            Self::PatternList => "pattern_list",
            Self::ExpressionList => "expression_list",
            Self::ReturnStatement => "return_statement",
            Self::PassStatement => "pass_statement",
            Self::IfStatement => "if_statement",
            Self::MatchStatement => "match_statement",
            Self::ForStatement => "for_statement",
            Self::WhileStatement => "while_statement",
            Self::BreakStatement => "break_statement",
            Self::ContinueStatement => "continue_statement",
            Self::TryStatement => "try_statement",
            Self::RaiseStatement => "raise_statement",
            Self::WithStatement => "with_statement",
            Self::Identifier => "identifier",
            Self::Call => "call",
            Self::ArgumentList => "argument_list",
            Self::KeywordArgument => "keyword_argument",
            Self::UnaryOperator => "unary_operator",
            Self::NotOperator => "not_operator",
            Self::BinaryOperator => "binary_operator",
            Self::BooleanOperator => "boolean_operator",
            Self::ComparisonOperator => "comparison_operator",
            Self::ConditionalExpression => "conditional_expression",
            Self::ParenthesizedExpression => "parenthesized_expression",
            Self::Lambda => "lambda",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::True => "true",
            Self::False => "false",
            Self::None => "none",
            Self::String => "string",
            Self::ConcatenatedString => "concatenated_string",
            Self::Interpolation => "interpolation",
            Self::Ellipsis => "ellipsis",
            Self::Tuple => "tuple",
            Self::List => "list",
            Self::Set => "set",
            Self::Dictionary => "dictionary",
            Self::ListComprehension => "list_comprehension",
            Self::SetComprehension => "set_comprehension",
            Self::DictionaryComprehension => "dictionary_comprehension",
            Self::GeneratorExpression => "generator_expression",
            Self::ListSplat => "list_splat",
            Self::DictionarySplat => "dictionary_splat",
            Self::Token(symbol) => symbol,
            Self::Other(kind) => kind,
        }
    }

    /// Literal kinds that lower to interned constants.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::Integer
                | Self::Float
                | Self::True
                | Self::False
                | Self::None
                | Self::String
                | Self::ConcatenatedString
                | Self::Ellipsis
        )
    }
}

/// A node of the syntax tree: kind, ordered children and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// Grammar field this node fills in its parent, if any.
    pub field: Option<&'static str>,
    /// Exact source text covered by the node.
    pub text: String,
    pub span: Span,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    #[must_use]
    pub const fn is_named(&self) -> bool {
        !matches!(self.kind, NodeKind::Token(_))
    }

    /// Children that are not anonymous tokens.
    pub fn named_children(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter(|child| child.is_named())
    }

    /// First child filling the given grammar field.
    #[must_use]
    pub fn child_by_field(&self, field: &str) -> Option<&SyntaxNode> {
        self.children.iter().find(|child| child.field == Some(field))
    }

    /// Checks whether an anonymous token with this symbol is a direct child.
    #[must_use]
    pub fn has_token(&self, symbol: &str) -> bool {
        self.children
            .iter()
            .any(|child| matches!(&child.kind, NodeKind::Token(s) if s == symbol))
    }

    /// Symbol of the first anonymous child token, skipping punctuation.
    #[must_use]
    pub fn operator_symbol(&self) -> Option<&str> {
        self.children.iter().find_map(|child| match &child.kind {
            NodeKind::Token(symbol) if !matches!(symbol.as_str(), "(" | ")" | ",") => {
                Some(symbol.as_str())
            }
            _ => None,
        })
    }

    /// Name declared by a function or class definition.
    #[must_use]
    pub fn definition_name(&self) -> Option<&str> {
        match self.kind {
            NodeKind::DecoratedDefinition => self
                .child_by_field("definition")
                .and_then(SyntaxNode::definition_name),
            _ => self.child_by_field("name").map(|name| name.text.as_str()),
        }
    }

    /// S-expression dump of the named structure below this node.
    #[must_use]
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        let _ = write!(out, "({}", self.kind.grammar_name());
        let mut named = self.named_children().peekable();
        if named.peek().is_none() {
            let _ = write!(out, " {:?}", self.text);
        }
        for child in named {
            out.push(' ');
            if let Some(field) = child.field {
                let _ = write!(out, "{field}: ");
            }
            child.write_sexp(out);
        }
        out.push(')');
    }
}

/// A parsed source text.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    pub source: String,
    pub root: SyntaxNode,
}

impl SyntaxTree {
    /// Top-level function definitions, decorated ones included.
    pub fn functions(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.root.named_children().filter(|node| {
            matches!(
                node.kind,
                NodeKind::FunctionDefinition | NodeKind::DecoratedDefinition
            ) && !matches!(
                node.child_by_field("definition").map(|d| &d.kind),
                Some(NodeKind::ClassDefinition)
            )
        })
    }

    /// Top-level function definition with the given name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&SyntaxNode> {
        self.functions()
            .find(|node| node.definition_name() == Some(name))
    }
}
