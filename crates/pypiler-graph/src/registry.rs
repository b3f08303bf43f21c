//! Caller-owned mapping from names to operators.

use std::collections::HashMap;

use pypiler_core::{LoweringOptions, RedefinitionPolicy};
use serde::Serialize;

use crate::{GraphError, Operator};

/// Registry of every operator known to a lowering session.
///
/// User-defined functions and primitive operator symbols (`+`, `<`,
/// `conditional`, ...) live side by side as the same kind of entity.
/// Entries are never removed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperatorRegistry {
    operators: HashMap<String, Operator>,
    #[serde(skip)]
    options: LoweringOptions,
}

impl OperatorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: LoweringOptions) -> Self {
        Self {
            operators: HashMap::new(),
            options,
        }
    }

    #[must_use]
    pub const fn options(&self) -> LoweringOptions {
        self.options
    }

    /// Looks up an operator without creating it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Operator> {
        self.operators.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    /// Checks whether `name` exists only as a forward-reference placeholder.
    #[must_use]
    pub fn is_placeholder(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|operator| !operator.is_lowered())
    }

    /// Returns the operator registered under `name`, declaring an empty
    /// placeholder if there is none.
    pub fn declare_or_get(&mut self, name: &str) -> &mut Operator {
        self.operators.entry(name.to_string()).or_insert_with(|| {
            tracing::trace!(operator = name, "declared placeholder operator");
            Operator::new(name)
        })
    }

    /// Registers a fresh, empty operator under `name`, replacing any previous
    /// registration.
    ///
    /// # Errors
    /// Returns [`GraphError::Redefinition`] if `name` holds a lowered operator
    /// and the registry rejects redefinitions.
    pub fn define(&mut self, name: &str) -> Result<&mut Operator, GraphError> {
        let mut operator = Operator::new(name);
        operator.mark_lowered();
        self.replace(operator)?;
        Ok(self.declare_or_get(name))
    }

    /// Installs a completely lowered operator under its own name.
    ///
    /// # Errors
    /// Returns [`GraphError::Redefinition`] if the name holds a lowered
    /// operator and the registry rejects redefinitions.
    pub fn install(&mut self, mut operator: Operator) -> Result<&Operator, GraphError> {
        let name = operator.name().to_string();
        operator.mark_lowered();
        self.replace(operator)?;
        Ok(self.declare_or_get(&name))
    }

    fn replace(&mut self, operator: Operator) -> Result<(), GraphError> {
        self.check_redefinition(operator.name())?;
        if self.lookup(operator.name()).is_some_and(Operator::is_lowered) {
            tracing::warn!(operator = operator.name(), "replacing previously lowered operator");
        }
        self.operators.insert(operator.name().to_string(), operator);
        Ok(())
    }

    /// Fails if `name` holds a lowered operator and the registry rejects
    /// redefinitions.
    ///
    /// # Errors
    /// Returns [`GraphError::Redefinition`] under the reject policy.
    pub fn check_redefinition(&self, name: &str) -> Result<(), GraphError> {
        let lowered = self.lookup(name).is_some_and(Operator::is_lowered);
        match self.options.redefinition {
            RedefinitionPolicy::Reject if lowered => {
                Err(GraphError::Redefinition(name.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Iterates over all operators in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        let mut operators: Vec<_> = self.operators.values().collect();
        operators.sort_by(|a, b| a.name().cmp(b.name()));
        operators.into_iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}
