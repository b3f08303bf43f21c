//! Implementation of the `pypiler check` command.

use std::path::Path;

use anyhow::Result;
use pypiler_cli::{pipeline, utils};
use pypiler_graph::OperatorRegistry;

/// Executes the `check` command to validate a module without printing graphs.
///
/// # Errors
/// Returns an error if the module cannot be read or a function fails to lower.
pub fn execute(file: &Path) -> Result<()> {
    let config = utils::load_config();
    let source = pipeline::read_source(file)?;

    let mut registry = OperatorRegistry::with_options(config.lowering);
    let count = pipeline::check_pipeline(&mut registry, file, &source)?;

    utils::print_status(
        "Checked",
        &format!("{} ({count} functions)", file.display()),
    );
    Ok(())
}
