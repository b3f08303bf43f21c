//! Text dumps of lowered graphs for debugging and the command line.

use std::fmt;

use crate::{BindingId, Constant, Operator, OperatorState};

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "literal {text}"),
            Self::Operator(name) => write!(f, "operator {name}"),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "operator {}({}) -> ({})",
            self.name(),
            self.parameters().join(", "),
            self.returns().join(", ")
        )?;
        if self.state() == OperatorState::Declared {
            write!(f, " [declared]")?;
        }
        writeln!(f)?;

        for (id, operation) in self.operations() {
            write!(f, "  op {}", operation.identifier)?;
            if id == self.boundary_id() {
                write!(f, " [boundary]")?;
            }
            if let Some(constant) = &operation.constant {
                write!(f, " [{constant}]")?;
            }
            writeln!(
                f,
                " in({}) out({})",
                self.slots(&operation.inputs),
                self.slots(&operation.outputs)
            )?;
        }

        for (_, carrier) in self.carriers() {
            let source = carrier
                .source
                .map_or_else(|| "?".to_string(), |binding| self.endpoint(binding));
            let destinations: Vec<_> = carrier
                .destinations
                .iter()
                .map(|binding| self.endpoint(*binding))
                .collect();
            writeln!(
                f,
                "  carrier {} <- {} -> [{}]",
                carrier.identifier,
                source,
                destinations.join(", ")
            )?;
        }
        Ok(())
    }
}

impl Operator {
    /// `operand=carrier` pairs of one side of an operation.
    fn slots(&self, slots: &[(String, BindingId)]) -> String {
        slots
            .iter()
            .map(|(operand, binding)| {
                let carrier = self.carrier(self.binding(*binding).carrier);
                format!("{operand}={}", carrier.identifier)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `operation.operand` end of a binding.
    fn endpoint(&self, binding: BindingId) -> String {
        let binding = self.binding(binding);
        let operation = self.operation(binding.operation);
        format!("{}.{}", operation.identifier, binding.operand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_display() {
        let operator = Operator::new("+");
        assert_eq!(operator.to_string(), "operator +() -> () [declared]\n  op + [boundary] in() out()\n");
    }

    #[test]
    fn test_constant_display() {
        assert_eq!(Constant::Literal("'a'".into()).to_string(), "literal 'a'");
        assert_eq!(Constant::Operator("+".into()).to_string(), "operator +");
    }
}
