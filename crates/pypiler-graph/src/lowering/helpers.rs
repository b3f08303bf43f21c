//! Helper functions for graph lowering.

use pypiler_core::{Construct, LoweringError, LoweringErrorKind, Span};
use pypiler_syntax::SyntaxNode;

use crate::lowering::core::{GraphLowering, LoweringResult, graph_error};
use crate::{CarrierId, Constant, OperationId, Operator};

/// Identifier of the operation created for `node`: its text and 1-based
/// start position, e.g. `(a + b) 3:12`.
pub(crate) fn node_identifier(node: &SyntaxNode) -> String {
    format!("({}) {}", node.text, node.span.start)
}

pub(crate) fn unsupported(construct: Construct, node: &SyntaxNode) -> LoweringError {
    LoweringError::unsupported(construct, node.span)
}

pub(crate) fn unsupported_expression(node: &SyntaxNode) -> LoweringError {
    LoweringError::new(
        LoweringErrorKind::UnsupportedExpression(node.to_sexp()),
        node.span,
    )
}

pub(crate) fn unsupported_statement(node: &SyntaxNode) -> LoweringError {
    LoweringError::new(
        LoweringErrorKind::UnsupportedStatement(node.to_sexp()),
        node.span,
    )
}

/// Child filling `field`; a tree lacking it is reported as an unsupported
/// expression of the parent.
pub(crate) fn required<'n>(node: &'n SyntaxNode, field: &str) -> LoweringResult<&'n SyntaxNode> {
    node.child_by_field(field)
        .ok_or_else(|| unsupported_expression(node))
}

impl GraphLowering<'_> {
    /// Adds the operation created for `node`.
    pub(crate) fn add_operation(
        &mut self,
        operator: &mut Operator,
        node: &SyntaxNode,
    ) -> LoweringResult<OperationId> {
        let identifier = node_identifier(node);
        tracing::trace!(operation = %identifier, "adding operation");
        operator
            .add_operation(identifier)
            .map_err(|e| graph_error(e, node.span))
    }

    /// Binds the interned constant of the operator named `symbol` to the
    /// `operator` input of `operation`, declaring the registry entry first.
    pub(crate) fn apply_operator(
        &mut self,
        operator: &mut Operator,
        operation: OperationId,
        symbol: &str,
        span: Span,
    ) -> LoweringResult<()> {
        self.registry.declare_or_get(symbol);
        let constant = operator.constant_carrier(Constant::Operator(symbol.to_string()));
        operator
            .bind_input(operation, constant, "operator")
            .map_err(|e| graph_error(e, span))?;
        Ok(())
    }

    /// Binds a fresh carrier to the `output` operand of `operation`.
    ///
    /// The carrier takes the assignment target's name when there is one and
    /// the operation's identifier otherwise.
    pub(crate) fn bind_result(
        &mut self,
        operator: &mut Operator,
        operation: OperationId,
        node: &SyntaxNode,
        target: Option<&str>,
    ) -> LoweringResult<CarrierId> {
        let identifier = match target {
            Some(name) => name.to_string(),
            None => operator.operation(operation).identifier.clone(),
        };
        let carrier = operator
            .add_carrier(identifier)
            .map_err(|e| graph_error(e, node.span))?;
        operator
            .bind_output(operation, carrier, "output")
            .map_err(|e| graph_error(e, node.span))?;
        Ok(carrier)
    }

    /// Applies `=` so that the carrier named after `target` carries `value`.
    pub(crate) fn bind_alias(
        &mut self,
        operator: &mut Operator,
        target: &SyntaxNode,
        value: CarrierId,
    ) -> LoweringResult<CarrierId> {
        let operation = self.add_operation(operator, target)?;
        operator
            .bind_input(operation, value, "input")
            .map_err(|e| graph_error(e, target.span))?;
        self.apply_operator(operator, operation, super::ALIAS_OPERATOR, target.span)?;
        self.bind_result(operator, operation, target, Some(&target.text))
    }
}
