//! Statement lowering.

use std::collections::HashSet;

use pypiler_core::{Construct, LoweringError, LoweringErrorKind};
use pypiler_syntax::{NodeKind, SyntaxNode};

use crate::lowering::core::{GraphLowering, LoweringResult, graph_error};
use crate::lowering::expressions::has_interpolation;
use crate::lowering::helpers::{required, unsupported, unsupported_statement};
use crate::Operator;

impl GraphLowering<'_> {
    /// Lowers a function body in order, stopping at the first failure.
    ///
    /// A `return` is only accepted as the last statement.
    pub(crate) fn lower_block(
        &mut self,
        operator: &mut Operator,
        block: &SyntaxNode,
    ) -> LoweringResult<()> {
        let statements: Vec<_> = block.named_children().collect();
        let last = statements.len().saturating_sub(1);

        for (index, statement) in statements.iter().enumerate() {
            if statement.kind == NodeKind::ReturnStatement && index != last {
                return Err(unsupported(Construct::EarlyReturn, statement));
            }
            self.lower_statement(operator, statement)?;
        }
        Ok(())
    }

    fn lower_statement(
        &mut self,
        operator: &mut Operator,
        statement: &SyntaxNode,
    ) -> LoweringResult<()> {
        let construct = match &statement.kind {
            NodeKind::ExpressionStatement => {
                return self.lower_expression_statement(operator, statement);
            }
            NodeKind::ReturnStatement => return self.lower_return(operator, statement),
            NodeKind::PassStatement => return Ok(()),

            NodeKind::FunctionDefinition => Construct::NestedDefinition,
            NodeKind::ClassDefinition => Construct::ClassDefinition,
            NodeKind::DecoratedDefinition => match statement.child_by_field("definition") {
                Some(definition) if definition.kind == NodeKind::ClassDefinition => {
                    Construct::ClassDefinition
                }
                _ => Construct::NestedDefinition,
            },

            NodeKind::IfStatement => Construct::If,
            NodeKind::MatchStatement => Construct::Match,
            NodeKind::ForStatement => Construct::For,
            NodeKind::WhileStatement => Construct::While,
            NodeKind::BreakStatement => Construct::Break,
            NodeKind::ContinueStatement => Construct::Continue,
            NodeKind::TryStatement => Construct::Try,
            NodeKind::RaiseStatement => Construct::Raise,
            NodeKind::WithStatement => Construct::With,

            _ => return Err(unsupported_statement(statement)),
        };
        Err(unsupported(construct, statement))
    }

    fn lower_expression_statement(
        &mut self,
        operator: &mut Operator,
        statement: &SyntaxNode,
    ) -> LoweringResult<()> {
        let children: Vec<_> = statement.named_children().collect();
        let [expression] = children.as_slice() else {
            // `a, b` is a bare tuple
            return Err(unsupported(Construct::CollectionLiteral, statement));
        };

        match &expression.kind {
            NodeKind::Assignment => self.lower_assignment(operator, expression),
            NodeKind::AugmentedAssignment => self.lower_augmented_assignment(operator, expression),
            // docstrings and other bare literals
            kind if kind.is_literal() && !has_interpolation(expression) => Ok(()),
            _ => self.lower_expression(operator, expression, None).map(|_| ()),
        }
    }

    /// Lowers `a = expr` and `a, b = x, y`.
    fn lower_assignment(
        &mut self,
        operator: &mut Operator,
        assignment: &SyntaxNode,
    ) -> LoweringResult<()> {
        if assignment.child_by_field("type").is_some() {
            return Err(unsupported(Construct::AnnotatedAssignment, assignment));
        }
        let left = required(assignment, "left")?;
        let right = required(assignment, "right")?;
        if matches!(
            right.kind,
            NodeKind::Assignment | NodeKind::AugmentedAssignment
        ) {
            return Err(unsupported(Construct::ChainedAssignment, assignment));
        }

        let targets = assignment_targets(operator, left)?;
        let values: Vec<_> = match right.kind {
            NodeKind::ExpressionList => right.named_children().collect(),
            _ => vec![right],
        };
        if targets.len() != values.len() {
            return Err(unsupported(Construct::AssignmentArity, assignment));
        }

        if let ([target], [value]) = (targets.as_slice(), values.as_slice()) {
            let carrier = self.lower_expression(operator, value, Some(&target.text))?;
            // names and literals resolve to an existing carrier
            if operator.carrier(carrier).identifier != target.text {
                self.bind_alias(operator, target, carrier)?;
            }
            return Ok(());
        }

        // every value is evaluated before any target is bound
        let carriers = values
            .into_iter()
            .map(|value| self.lower_expression(operator, value, None))
            .collect::<LoweringResult<Vec<_>>>()?;
        for (target, carrier) in targets.into_iter().zip(carriers) {
            self.bind_alias(operator, target, carrier)?;
        }
        Ok(())
    }

    /// `x += 1` rebinds `x`, which single assignment forbids.
    fn lower_augmented_assignment(
        &mut self,
        operator: &mut Operator,
        assignment: &SyntaxNode,
    ) -> LoweringResult<()> {
        let left = required(assignment, "left")?;
        if left.kind != NodeKind::Identifier {
            return Err(unsupported(Construct::AssignmentTarget, left));
        }

        let kind = if operator.find_carrier(&left.text).is_some() {
            LoweringErrorKind::SingleAssignmentViolation(left.text.clone())
        } else {
            LoweringErrorKind::UndefinedReference(left.text.clone())
        };
        Err(LoweringError::new(kind, left.span))
    }

    /// Binds the returned values to the boundary operation's inputs.
    fn lower_return(
        &mut self,
        operator: &mut Operator,
        statement: &SyntaxNode,
    ) -> LoweringResult<()> {
        let values: Vec<_> = match statement.named_children().next() {
            None => Vec::new(),
            Some(list) if list.kind == NodeKind::ExpressionList => {
                list.named_children().collect()
            }
            Some(single) => vec![single],
        };

        let boundary = operator.boundary_id();
        let single = values.len() == 1;
        for (index, value) in values.into_iter().enumerate() {
            let carrier = self.lower_expression(operator, value, None)?;
            let operand = if single {
                "output".to_string()
            } else {
                format!("output{index}")
            };
            operator
                .bind_input(boundary, carrier, operand)
                .map_err(|e| graph_error(e, value.span))?;
        }
        Ok(())
    }
}

/// Checks the left-hand side of an assignment: plain, distinct, unbound names.
fn assignment_targets<'n>(
    operator: &Operator,
    left: &'n SyntaxNode,
) -> LoweringResult<Vec<&'n SyntaxNode>> {
    let targets: Vec<_> = match left.kind {
        NodeKind::PatternList => left.named_children().collect(),
        _ => vec![left],
    };

    let mut seen = HashSet::new();
    for target in &targets {
        if target.kind != NodeKind::Identifier {
            return Err(unsupported(Construct::AssignmentTarget, target));
        }
        if operator.find_carrier(&target.text).is_some() || !seen.insert(target.text.as_str()) {
            return Err(LoweringError::new(
                LoweringErrorKind::SingleAssignmentViolation(target.text.clone()),
                target.span,
            ));
        }
    }
    Ok(targets)
}
