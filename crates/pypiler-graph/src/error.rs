//! Violations of the graph model's structural invariants.

use thiserror::Error;

use crate::Direction;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("operation `{0}` already exists")]
    DuplicateOperation(String),

    #[error("carrier `{0}` already exists")]
    DuplicateCarrier(String),

    #[error("operand `{operand}` of `{operation}` is already bound as {direction}")]
    OperandAlreadyBound {
        operation: String,
        operand: String,
        direction: Direction,
    },

    #[error("carrier `{0}` already has a producer")]
    CarrierAlreadyProduced(String),

    #[error("carrier `{0}` has no producer")]
    UnproducedCarrier(String),

    #[error("operator `{0}` is already defined")]
    Redefinition(String),
}
