//! Command-line interface for PyPiler.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pypiler_utils::OutputFormat;

#[derive(Parser)]
#[command(name = "pypiler")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower Python functions into dataflow graphs and print them
    #[command(visible_alias = "l")]
    Lower {
        /// Python module to read
        file: PathBuf,

        /// Lower only this top-level function
        #[arg(short, long)]
        function: Option<String>,

        /// Output format, overriding pypiler.toml
        #[arg(long, value_enum)]
        format: Option<Format>,
    },

    /// Check that every function in a module lowers
    #[command(visible_alias = "c")]
    Check {
        /// Python module to read
        file: PathBuf,
    },

    /// Write a default pypiler.toml in the current directory
    Init,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => Self::Text,
            Format::Json => Self::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    pypiler_cli::utils::init_tracing(cli.verbose);

    match cli.command {
        Commands::Lower {
            file,
            function,
            format,
        } => commands::lower::execute(&file, function.as_deref(), format.map(Into::into)),
        Commands::Check { file } => commands::check::execute(&file),
        Commands::Init => commands::init::execute(),
    }
}
