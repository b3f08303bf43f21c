//! Expression lowering.

use pypiler_core::{Construct, LoweringError, LoweringErrorKind};
use pypiler_syntax::{NodeKind, SyntaxNode};

use crate::lowering::core::{GraphLowering, LoweringResult, graph_error};
use crate::lowering::helpers::{required, unsupported, unsupported_expression};
use crate::{CarrierId, Constant, Operator};

impl GraphLowering<'_> {
    /// Lowers an expression and returns the carrier holding its value.
    ///
    /// `target` names the carrier of the outermost operation when the
    /// expression is the right-hand side of an assignment.
    pub(crate) fn lower_expression(
        &mut self,
        operator: &mut Operator,
        node: &SyntaxNode,
        target: Option<&str>,
    ) -> LoweringResult<CarrierId> {
        match &node.kind {
            NodeKind::ParenthesizedExpression => {
                let inner = node
                    .named_children()
                    .next()
                    .ok_or_else(|| unsupported_expression(node))?;
                self.lower_expression(operator, inner, target)
            }

            NodeKind::String | NodeKind::ConcatenatedString if has_interpolation(node) => {
                Err(unsupported(Construct::FormattedString, node))
            }

            kind if kind.is_literal() => {
                Ok(operator.constant_carrier(Constant::Literal(node.text.clone())))
            }

            NodeKind::Identifier => operator.find_carrier(&node.text).ok_or_else(|| {
                LoweringError::new(
                    LoweringErrorKind::UndefinedReference(node.text.clone()),
                    node.span,
                )
            }),

            NodeKind::Tuple
            | NodeKind::List
            | NodeKind::Set
            | NodeKind::Dictionary
            | NodeKind::ListComprehension
            | NodeKind::SetComprehension
            | NodeKind::DictionaryComprehension
            | NodeKind::GeneratorExpression
            | NodeKind::ListSplat
            | NodeKind::DictionarySplat => Err(unsupported(Construct::CollectionLiteral, node)),

            NodeKind::Lambda => Err(unsupported(Construct::Lambda, node)),

            NodeKind::Call => self.lower_call(operator, node, target),

            NodeKind::UnaryOperator | NodeKind::NotOperator => {
                self.lower_unary(operator, node, target)
            }

            NodeKind::BinaryOperator | NodeKind::BooleanOperator | NodeKind::ComparisonOperator => {
                self.lower_binary(operator, node, target)
            }

            NodeKind::ConditionalExpression => self.lower_conditional(operator, node, target),

            _ => Err(unsupported_expression(node)),
        }
    }

    /// Lowers `f(name=value, ...)`: keyword names become input operands.
    fn lower_call(
        &mut self,
        operator: &mut Operator,
        node: &SyntaxNode,
        target: Option<&str>,
    ) -> LoweringResult<CarrierId> {
        let callee = required(node, "function")?;
        let is_named_callee = callee.kind == NodeKind::Identifier
            || callee.kind == NodeKind::Other("attribute".into());
        if !is_named_callee {
            return Err(unsupported(Construct::ComputedCallee, callee));
        }

        let arguments = required(node, "arguments")?;
        if arguments.kind != NodeKind::ArgumentList {
            // `f(x for x in xs)`
            return Err(unsupported(Construct::CollectionLiteral, arguments));
        }

        let operation = self.add_operation(operator, node)?;
        for argument in arguments.named_children() {
            match argument.kind {
                NodeKind::KeywordArgument => {
                    let name = required(argument, "name")?;
                    let value = required(argument, "value")?;
                    let carrier = self.lower_expression(operator, value, None)?;
                    operator
                        .bind_input(operation, carrier, name.text.clone())
                        .map_err(|e| graph_error(e, argument.span))?;
                }
                NodeKind::ListSplat | NodeKind::DictionarySplat => {
                    return Err(unsupported(Construct::CollectionLiteral, argument));
                }
                _ => return Err(unsupported(Construct::PositionalArgument, argument)),
            }
        }

        self.apply_operator(operator, operation, &callee.text, callee.span)?;
        self.bind_result(operator, operation, node, target)
    }

    /// Lowers `-x`, `~x` and `not x`.
    fn lower_unary(
        &mut self,
        operator: &mut Operator,
        node: &SyntaxNode,
        target: Option<&str>,
    ) -> LoweringResult<CarrierId> {
        let argument = required(node, "argument")?;
        let symbol = node
            .operator_symbol()
            .ok_or_else(|| unsupported_expression(node))?;

        let operation = self.add_operation(operator, node)?;
        let input = self.lower_expression(operator, argument, None)?;
        operator
            .bind_input(operation, input, "input")
            .map_err(|e| graph_error(e, argument.span))?;

        self.apply_operator(operator, operation, symbol, node.span)?;
        self.bind_result(operator, operation, node, target)
    }

    /// Lowers arithmetic, boolean and single comparison operators.
    fn lower_binary(
        &mut self,
        operator: &mut Operator,
        node: &SyntaxNode,
        target: Option<&str>,
    ) -> LoweringResult<CarrierId> {
        let operands: Vec<_> = node.named_children().collect();
        if node.kind == NodeKind::ComparisonOperator && operands.len() > 2 {
            return Err(unsupported(Construct::ChainedComparison, node));
        }
        let [left, right] = operands.as_slice() else {
            return Err(unsupported_expression(node));
        };
        let symbol = node
            .operator_symbol()
            .ok_or_else(|| unsupported_expression(node))?;

        let operation = self.add_operation(operator, node)?;
        for (operand, side) in [("inputL", left), ("inputR", right)] {
            let input = self.lower_expression(operator, side, None)?;
            operator
                .bind_input(operation, input, operand)
                .map_err(|e| graph_error(e, side.span))?;
        }

        self.apply_operator(operator, operation, symbol, node.span)?;
        self.bind_result(operator, operation, node, target)
    }

    /// Lowers `a if c else b` to the `conditional` operator.
    fn lower_conditional(
        &mut self,
        operator: &mut Operator,
        node: &SyntaxNode,
        target: Option<&str>,
    ) -> LoweringResult<CarrierId> {
        let operands: Vec<_> = node.named_children().collect();
        let [when_true, condition, when_false] = operands.as_slice() else {
            return Err(unsupported_expression(node));
        };

        let operation = self.add_operation(operator, node)?;
        for (operand, branch) in [
            ("inputTrue", when_true),
            ("condition", condition),
            ("inputFalse", when_false),
        ] {
            let input = self.lower_expression(operator, branch, None)?;
            operator
                .bind_input(operation, input, operand)
                .map_err(|e| graph_error(e, branch.span))?;
        }

        self.apply_operator(operator, operation, super::CONDITIONAL_OPERATOR, node.span)?;
        self.bind_result(operator, operation, node, target)
    }
}

/// Checks whether a string literal contains f-string interpolations.
pub(crate) fn has_interpolation(node: &SyntaxNode) -> bool {
    node.children.iter().any(|child| match child.kind {
        NodeKind::Interpolation => true,
        NodeKind::String => has_interpolation(child),
        _ => false,
    })
}
