//! Implementation of the `pypiler lower` command.

use std::path::Path;

use anyhow::Result;
use pypiler_cli::{pipeline, utils};
use pypiler_graph::OperatorRegistry;
use pypiler_utils::OutputFormat;

/// Executes the `lower` command and prints the resulting graphs.
///
/// # Errors
/// Returns an error if the module cannot be read or a function fails to lower.
pub fn execute(file: &Path, function: Option<&str>, format: Option<OutputFormat>) -> Result<()> {
    let config = utils::load_config();
    let format = format.unwrap_or(config.output.format);

    let source = pipeline::read_source(file)?;
    let mut registry = OperatorRegistry::with_options(config.lowering);
    let names = pipeline::lower(&mut registry, file, &source, function)?;

    println!("{}", pipeline::render(&registry, &names, format)?);
    Ok(())
}
