//! Syntax tree to dataflow graph lowering.

mod core;
mod expressions;
mod helpers;
mod program;
mod statements;

pub use self::core::GraphLowering;

/// Registry entry applied by `y = x` and `y = <literal>`.
pub const ALIAS_OPERATOR: &str = "=";

/// Registry entry applied by `a if c else b`.
pub const CONDITIONAL_OPERATOR: &str = "conditional";
