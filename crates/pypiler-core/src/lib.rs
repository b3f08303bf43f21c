//! Core types shared by every PyPiler stage.
//!
//! This crate provides source spans, the lowering error family and the
//! options that steer how functions are lowered into dataflow graphs.

pub mod error;
pub mod options;
pub mod span;

pub use error::{Construct, Error, LoweringError, LoweringErrorKind, Result};
pub use options::{LoweringOptions, RedefinitionPolicy};
pub use span::{Location, Span};
