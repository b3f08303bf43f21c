//! Operators: named, reusable units of computation.

use std::collections::HashMap;

use serde::Serialize;

use crate::{Binding, Carrier, Constant, Direction, GraphError, Operation};

/// Index of an operation inside its operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OperationId(pub(crate) usize);

/// Index of a carrier inside its operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CarrierId(pub(crate) usize);

/// Index of a binding inside its operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BindingId(pub(crate) usize);

/// How an operator came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorState {
    /// Placeholder created by a forward reference (a call target or an
    /// operator symbol) that has not been lowered.
    Declared,
    /// Built by lowering a function definition.
    Lowered,
}

/// A named operator owning its operations, carriers and bindings.
///
/// The boundary operation's outputs are the operator's parameters and its
/// inputs are the operator's return values, so a caller can treat the
/// operator as if it were an operation.
#[derive(Debug, Clone, Serialize)]
pub struct Operator {
    name: String,
    state: OperatorState,
    boundary: OperationId,
    operations: Vec<Operation>,
    carriers: Vec<Carrier>,
    bindings: Vec<Binding>,
    #[serde(skip)]
    operation_index: HashMap<String, OperationId>,
    #[serde(skip)]
    carrier_index: HashMap<String, CarrierId>,
}

impl Operator {
    /// Creates an empty operator whose boundary operation is named after it.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut operator = Self {
            name: name.clone(),
            state: OperatorState::Declared,
            boundary: OperationId(0),
            operations: Vec::new(),
            carriers: Vec::new(),
            bindings: Vec::new(),
            operation_index: HashMap::new(),
            carrier_index: HashMap::new(),
        };
        operator.boundary = operator.push_operation(Operation::new(name));
        operator
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn state(&self) -> OperatorState {
        self.state
    }

    #[must_use]
    pub fn is_lowered(&self) -> bool {
        self.state == OperatorState::Lowered
    }

    pub(crate) fn mark_lowered(&mut self) {
        self.state = OperatorState::Lowered;
    }

    #[must_use]
    pub const fn boundary_id(&self) -> OperationId {
        self.boundary
    }

    #[must_use]
    pub fn boundary(&self) -> &Operation {
        self.operation(self.boundary)
    }

    /// Formal parameters, in binding order.
    #[must_use]
    pub fn parameters(&self) -> Vec<&str> {
        self.boundary().output_operands().collect()
    }

    /// Return slots, in binding order.
    #[must_use]
    pub fn returns(&self) -> Vec<&str> {
        self.boundary().input_operands().collect()
    }

    #[must_use]
    pub fn operation(&self, id: OperationId) -> &Operation {
        &self.operations[id.0]
    }

    #[must_use]
    pub fn carrier(&self, id: CarrierId) -> &Carrier {
        &self.carriers[id.0]
    }

    #[must_use]
    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.0]
    }

    /// All operations in creation order, the boundary operation first.
    pub fn operations(&self) -> impl Iterator<Item = (OperationId, &Operation)> {
        self.operations
            .iter()
            .enumerate()
            .map(|(index, operation)| (OperationId(index), operation))
    }

    /// All carriers in creation order.
    pub fn carriers(&self) -> impl Iterator<Item = (CarrierId, &Carrier)> {
        self.carriers
            .iter()
            .enumerate()
            .map(|(index, carrier)| (CarrierId(index), carrier))
    }

    pub fn bindings(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
        self.bindings
            .iter()
            .enumerate()
            .map(|(index, binding)| (BindingId(index), binding))
    }

    #[must_use]
    pub fn find_operation(&self, identifier: &str) -> Option<OperationId> {
        self.operation_index.get(identifier).copied()
    }

    #[must_use]
    pub fn find_carrier(&self, identifier: &str) -> Option<CarrierId> {
        self.carrier_index.get(identifier).copied()
    }

    /// Carrier produced by the named output operand of an operation.
    #[must_use]
    pub fn output_carrier(&self, operation: OperationId, operand: &str) -> Option<CarrierId> {
        self.operation(operation)
            .output(operand)
            .map(|binding| self.binding(binding).carrier)
    }

    /// Carrier consumed by the named input operand of an operation.
    #[must_use]
    pub fn input_carrier(&self, operation: OperationId, operand: &str) -> Option<CarrierId> {
        self.operation(operation)
            .input(operand)
            .map(|binding| self.binding(binding).carrier)
    }

    /// Adds an operation with a fresh identifier.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateOperation`] if the identifier is taken.
    pub fn add_operation(&mut self, identifier: impl Into<String>) -> Result<OperationId, GraphError> {
        let identifier = identifier.into();
        if self.operation_index.contains_key(&identifier) {
            return Err(GraphError::DuplicateOperation(identifier));
        }
        Ok(self.push_operation(Operation::new(identifier)))
    }

    /// Adds a carrier with a fresh identifier.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateCarrier`] if the identifier is taken.
    pub fn add_carrier(&mut self, identifier: impl Into<String>) -> Result<CarrierId, GraphError> {
        let identifier = identifier.into();
        if self.carrier_index.contains_key(&identifier) {
            return Err(GraphError::DuplicateCarrier(identifier));
        }
        Ok(self.push_carrier(Carrier::new(identifier)))
    }

    /// Records that `operation` consumes `carrier` under `operand`.
    ///
    /// # Errors
    /// Returns [`GraphError::OperandAlreadyBound`] if the operation already
    /// has an input with that operand name.
    pub fn bind_input(
        &mut self,
        operation: OperationId,
        carrier: CarrierId,
        operand: impl Into<String>,
    ) -> Result<BindingId, GraphError> {
        let operand = operand.into();
        if self.operation(operation).input(&operand).is_some() {
            return Err(self.operand_taken(operation, operand, Direction::Input));
        }

        let binding = self.push_binding(carrier, operation, &operand, Direction::Input);
        self.carriers[carrier.0].destinations.push(binding);
        self.operations[operation.0].inputs.push((operand, binding));
        Ok(binding)
    }

    /// Records that `operation` produces `carrier` under `operand`.
    ///
    /// # Errors
    /// Returns [`GraphError::OperandAlreadyBound`] if the operand is taken and
    /// [`GraphError::CarrierAlreadyProduced`] if the carrier has a producer.
    pub fn bind_output(
        &mut self,
        operation: OperationId,
        carrier: CarrierId,
        operand: impl Into<String>,
    ) -> Result<BindingId, GraphError> {
        let operand = operand.into();
        if self.operation(operation).output(&operand).is_some() {
            return Err(self.operand_taken(operation, operand, Direction::Output));
        }
        if self.carrier(carrier).is_produced() {
            return Err(GraphError::CarrierAlreadyProduced(
                self.carrier(carrier).identifier.clone(),
            ));
        }

        let binding = self.push_binding(carrier, operation, &operand, Direction::Output);
        self.carriers[carrier.0].source = Some(binding);
        self.operations[operation.0].outputs.push((operand, binding));
        Ok(binding)
    }

    /// Returns the carrier of a constant, creating it on first use.
    ///
    /// Equal constants share one operation and one carrier per operator.
    pub fn constant_carrier(&mut self, constant: Constant) -> CarrierId {
        let identifier = constant.identifier();
        if let Some(existing) = self
            .find_operation(&identifier)
            .and_then(|operation| self.output_carrier(operation, "output"))
        {
            return existing;
        }

        let mut operation = Operation::new(identifier.clone());
        operation.constant = Some(constant);
        let operation = self.push_operation(operation);
        let carrier = self.push_carrier(Carrier::new(identifier));

        let binding = self.push_binding(carrier, operation, "output", Direction::Output);
        self.carriers[carrier.0].source = Some(binding);
        self.operations[operation.0]
            .outputs
            .push(("output".to_string(), binding));
        carrier
    }

    /// Checks that every carrier has exactly one producer.
    ///
    /// # Errors
    /// Returns [`GraphError::UnproducedCarrier`] for the first carrier
    /// without a producer.
    pub fn validate(&self) -> Result<(), GraphError> {
        match self.carriers.iter().find(|carrier| !carrier.is_produced()) {
            Some(carrier) => Err(GraphError::UnproducedCarrier(carrier.identifier.clone())),
            None => Ok(()),
        }
    }

    fn operand_taken(
        &self,
        operation: OperationId,
        operand: String,
        direction: Direction,
    ) -> GraphError {
        GraphError::OperandAlreadyBound {
            operation: self.operation(operation).identifier.clone(),
            operand,
            direction,
        }
    }

    fn push_operation(&mut self, operation: Operation) -> OperationId {
        let id = OperationId(self.operations.len());
        self.operation_index.insert(operation.identifier.clone(), id);
        self.operations.push(operation);
        id
    }

    fn push_carrier(&mut self, carrier: Carrier) -> CarrierId {
        let id = CarrierId(self.carriers.len());
        self.carrier_index.insert(carrier.identifier.clone(), id);
        self.carriers.push(carrier);
        id
    }

    fn push_binding(
        &mut self,
        carrier: CarrierId,
        operation: OperationId,
        operand: &str,
        direction: Direction,
    ) -> BindingId {
        let id = BindingId(self.bindings.len());
        self.bindings.push(Binding {
            carrier,
            operation,
            operand: operand.to_string(),
            direction,
        });
        id
    }
}
