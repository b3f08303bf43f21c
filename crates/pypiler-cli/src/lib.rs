//! PyPiler CLI library for testing and reusability.

pub mod pipeline;
pub mod utils;

pub use pypiler_utils::Config;
