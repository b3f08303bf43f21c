//! Lowering pipeline stages.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use miette::NamedSource;
use pypiler_graph::{GraphLowering, Operator, OperatorRegistry};
use pypiler_syntax::{PythonParser, SourceParser, SyntaxTree};
use pypiler_utils::OutputFormat;

/// Reads a Python module from disk.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Prints a diagnostic for `error` against the module source.
fn report(error: pypiler_core::Error, path: &Path, source: &str) {
    let report = miette::Report::new(error)
        .with_source_code(NamedSource::new(path.display().to_string(), source.to_string()));
    eprintln!("{report:?}");
}

/// Parses a module, printing a diagnostic on failure.
///
/// # Errors
/// Returns an error if the source is not valid Python.
pub fn parse(path: &Path, source: &str) -> Result<SyntaxTree> {
    PythonParser::new().parse(source).map_err(|e| {
        report(e, path, source);
        anyhow::anyhow!("Parsing failed")
    })
}

/// Lowers one function of the module, or all of them, into `registry`.
///
/// Returns the names of the lowered operators in source order.
///
/// # Errors
/// Returns an error if parsing fails, the requested function does not
/// exist, or a function uses anything outside the supported subset.
pub fn lower(
    registry: &mut OperatorRegistry,
    path: &Path,
    source: &str,
    function: Option<&str>,
) -> Result<Vec<String>> {
    let tree = parse(path, source)?;
    let mut lowering = GraphLowering::new(registry);

    let result = match function {
        Some(name) => {
            let definition = tree.function(name).with_context(|| {
                format!("No top-level function `{name}` in {}", path.display())
            })?;
            lowering
                .lower_definition(definition)
                .map(|operator| vec![operator.name().to_string()])
        }
        None => {
            tracing::info!(
                file = %path.display(),
                functions = tree.functions().count(),
                "lowering module"
            );
            lowering.lower_tree(&tree)
        }
    };

    result.map_err(|e| {
        report(e, path, source);
        anyhow::anyhow!("Lowering failed")
    })
}

/// Renders the named operators in the requested format.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render(registry: &OperatorRegistry, names: &[String], format: OutputFormat) -> Result<String> {
    let operators: Vec<&Operator> = names
        .iter()
        .filter_map(|name| registry.lookup(name))
        .collect();

    match format {
        OutputFormat::Text => Ok(operators
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&operators).with_context(|| "Failed to serialize graphs")
        }
    }
}

/// Lowers every function of a module without printing anything.
///
/// # Errors
/// Returns an error if any function fails to lower.
pub fn check_pipeline(registry: &mut OperatorRegistry, path: &Path, source: &str) -> Result<usize> {
    lower(registry, path, source, None).map(|names| names.len())
}
