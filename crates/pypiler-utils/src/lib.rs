//! Shared utilities for PyPiler tools.

pub mod config;

pub use config::{CONFIG_FILE, Config, OutputFormat, OutputOptions};
