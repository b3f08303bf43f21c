//! Common test utilities for lowering tests.

#![allow(dead_code)]

use pypiler_core::{Error, LoweringError, LoweringErrorKind, Result};
use pypiler_graph::{GraphLowering, Operator, OperatorRegistry};
use pypiler_syntax::PythonParser;

/// Lowers every function in `source` into a fresh registry.
pub fn lower_into(registry: &mut OperatorRegistry, source: &str) -> Result<Vec<String>> {
    GraphLowering::new(registry).lower_source(&PythonParser::new(), source)
}

/// Lowers `source`, which must succeed, and returns the registry.
pub fn lower(source: &str) -> OperatorRegistry {
    let mut registry = OperatorRegistry::new();
    if let Err(error) = lower_into(&mut registry, source) {
        panic!("lowering failed: {error}");
    }
    registry
}

/// Lowered operator named `name` from `registry`.
pub fn operator<'r>(registry: &'r OperatorRegistry, name: &str) -> &'r Operator {
    registry
        .lookup(name)
        .unwrap_or_else(|| panic!("no operator `{name}`"))
}

/// Lowers `source`, which must fail while lowering, and returns the error.
pub fn lowering_error(source: &str) -> LoweringError {
    let mut registry = OperatorRegistry::new();
    match lower_into(&mut registry, source) {
        Err(Error::Lowering(error)) => error,
        Err(other) => panic!("expected a lowering error, got {other}"),
        Ok(names) => panic!("expected a lowering error, lowered {names:?}"),
    }
}

/// Asserts the error kind and its 1-based position.
pub fn assert_error_at(error: &LoweringError, kind: LoweringErrorKind, line: usize, column: usize) {
    assert_eq!(error.kind, kind, "unexpected error: {error}");
    assert_eq!((error.line(), error.column()), (line, column), "wrong position: {error}");
}

/// Carrier bound to the named input operand of the named operation.
pub fn input_of<'o>(operator: &'o Operator, operation: &str, operand: &str) -> &'o str {
    let id = operator
        .find_operation(operation)
        .unwrap_or_else(|| panic!("no operation `{operation}`"));
    let carrier = operator
        .input_carrier(id, operand)
        .unwrap_or_else(|| panic!("`{operation}` has no input `{operand}`"));
    &operator.carrier(carrier).identifier
}

/// Carrier bound to the named output operand of the named operation.
pub fn output_of<'o>(operator: &'o Operator, operation: &str, operand: &str) -> &'o str {
    let id = operator
        .find_operation(operation)
        .unwrap_or_else(|| panic!("no operation `{operation}`"));
    let carrier = operator
        .output_carrier(id, operand)
        .unwrap_or_else(|| panic!("`{operation}` has no output `{operand}`"));
    &operator.carrier(carrier).identifier
}

/// Input operand names of the named operation, in binding order.
pub fn inputs_of<'o>(operator: &'o Operator, operation: &str) -> Vec<&'o str> {
    let id = operator
        .find_operation(operation)
        .unwrap_or_else(|| panic!("no operation `{operation}`"));
    operator.operation(id).input_operands().collect()
}
