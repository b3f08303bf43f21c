//! Data edges and the bindings that attach them to operations.

use std::fmt;

use serde::Serialize;

use crate::{BindingId, CarrierId, OperationId};

/// Which side of an operation a binding attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The operation consumes the carrier.
    Input,
    /// The operation produces the carrier.
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Associates one carrier with one operation under a named operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub carrier: CarrierId,
    pub operation: OperationId,
    pub operand: String,
    pub direction: Direction,
}

/// A single-producer, multi-consumer dataflow value.
///
/// The identifier doubles as the variable name visible to later statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Carrier {
    pub identifier: String,
    pub source: Option<BindingId>,
    pub destinations: Vec<BindingId>,
}

impl Carrier {
    pub(crate) fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            source: None,
            destinations: Vec::new(),
        }
    }

    /// Checks whether a producer has been attached.
    #[must_use]
    pub const fn is_produced(&self) -> bool {
        self.source.is_some()
    }
}
