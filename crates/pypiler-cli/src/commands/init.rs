//! Implementation of the `pypiler init` command.

use std::path::Path;

use anyhow::Result;
use pypiler_cli::utils;
use pypiler_utils::{CONFIG_FILE, Config};

/// Executes the `init` command to write a default configuration file.
///
/// # Errors
/// Returns an error if pypiler.toml already exists or cannot be written.
pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        anyhow::bail!("{CONFIG_FILE} already exists in current directory");
    }

    Config::new().save(CONFIG_FILE)?;
    utils::print_status("Created", CONFIG_FILE);
    Ok(())
}
