//! Core lowering structure and error mapping.

use pypiler_core::{LoweringError, LoweringErrorKind, Span};

use crate::{GraphError, OperatorRegistry};

pub(crate) type LoweringResult<T> = std::result::Result<T, LoweringError>;

/// Lowers function definitions into operators of a borrowed registry.
///
/// Each function is built detached from the registry and installed only
/// once its whole body lowered, so a failure leaves any previous operator
/// of the same name untouched.
pub struct GraphLowering<'r> {
    pub(crate) registry: &'r mut OperatorRegistry,
}

impl<'r> GraphLowering<'r> {
    #[must_use]
    pub fn new(registry: &'r mut OperatorRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &OperatorRegistry {
        self.registry
    }
}

/// Pins a graph invariant violation to the node that caused it.
pub(crate) fn graph_error(error: GraphError, span: Span) -> LoweringError {
    let kind = match error {
        GraphError::DuplicateCarrier(name) | GraphError::CarrierAlreadyProduced(name) => {
            LoweringErrorKind::SingleAssignmentViolation(name)
        }
        GraphError::OperandAlreadyBound { operand, .. } => {
            LoweringErrorKind::DuplicateOperand(operand)
        }
        GraphError::Redefinition(name) => LoweringErrorKind::Redefinition(name),
        other => LoweringErrorKind::InvalidGraph(other.to_string()),
    };
    LoweringError::new(kind, span)
}
