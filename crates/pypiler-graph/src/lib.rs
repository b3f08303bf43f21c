//! Dataflow graph model and the lowering of Python functions into it.
//!
//! A lowered function becomes an [`Operator`]: a set of [`Operation`]s wired
//! together by single-producer [`Carrier`]s through named [`Binding`]s.
//! Every operator lives in a caller-owned [`OperatorRegistry`].

mod carrier;
mod display;
mod error;
mod lowering;
mod operation;
mod operator;
mod registry;

pub use carrier::{Binding, Carrier, Direction};
pub use error::GraphError;
pub use lowering::{ALIAS_OPERATOR, CONDITIONAL_OPERATOR, GraphLowering};
pub use operation::{Constant, Operation};
pub use operator::{BindingId, CarrierId, OperationId, Operator, OperatorState};
pub use registry::OperatorRegistry;
