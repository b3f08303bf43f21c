//! Utility functions shared across the CLI.

use colored::Colorize;
use pypiler_utils::Config;
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins over the verbosity count when it is set.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loads the nearest pypiler.toml, falling back to defaults.
#[must_use]
pub fn load_config() -> Config {
    match Config::find() {
        Ok((config, root)) => {
            tracing::debug!(root = %root.display(), "using project configuration");
            config
        }
        Err(e) => {
            tracing::debug!("no configuration loaded: {e:#}");
            Config::default()
        }
    }
}

/// Prints a status message with colored output.
pub fn print_status(status: &str, message: &str) {
    println!("{} {message}", status.green().bold());
}
