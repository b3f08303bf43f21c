//! Computation steps inside an operator's body.

use serde::Serialize;

use crate::BindingId;

/// Payload of a constant-producing operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Constant {
    /// A literal, stored as its exact source text.
    Literal(String),
    /// A reference to the registry entry with this name.
    Operator(String),
}

impl Constant {
    /// Canonical identifier of the constant within an operator.
    ///
    /// Literals and operator references never share an identifier, so the
    /// literal `1` and an operator named `1` stay distinct.
    #[must_use]
    pub fn identifier(&self) -> String {
        match self {
            Self::Literal(text) => format!("Literal<{text}>"),
            Self::Operator(name) => format!("OpConst<{name}>"),
        }
    }
}

/// One computation step: named inputs, named outputs, optional constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub identifier: String,
    pub inputs: Vec<(String, BindingId)>,
    pub outputs: Vec<(String, BindingId)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<Constant>,
}

impl Operation {
    pub(crate) fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            constant: None,
        }
    }

    /// Binding attached to the named input operand.
    #[must_use]
    pub fn input(&self, operand: &str) -> Option<BindingId> {
        Self::find(&self.inputs, operand)
    }

    /// Binding attached to the named output operand.
    #[must_use]
    pub fn output(&self, operand: &str) -> Option<BindingId> {
        Self::find(&self.outputs, operand)
    }

    pub fn input_operands(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|(operand, _)| operand.as_str())
    }

    pub fn output_operands(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|(operand, _)| operand.as_str())
    }

    fn find(slots: &[(String, BindingId)], operand: &str) -> Option<BindingId> {
        slots
            .iter()
            .find(|(name, _)| name == operand)
            .map(|(_, binding)| *binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_identifiers_do_not_collide() {
        let literal = Constant::Literal("1".into());
        let operator = Constant::Operator("1".into());

        assert_eq!(literal.identifier(), "Literal<1>");
        assert_eq!(operator.identifier(), "OpConst<1>");
        assert_ne!(literal.identifier(), operator.identifier());
    }
}
