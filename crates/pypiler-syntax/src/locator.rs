//! Retrieval of a single function's source text.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use pypiler_core::{Error, Result};

use crate::parser::{PythonParser, SourceParser};

/// Names a function to be lowered, optionally inside a module file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionRef {
    pub name: String,
    pub module: Option<PathBuf>,
}

impl FunctionRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: None,
        }
    }

    #[must_use]
    pub fn in_module(module: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: Some(module.into()),
        }
    }
}

impl fmt::Display for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Some(module) => write!(f, "{}::{}", module.display(), self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Supplies the literal source text of a function.
pub trait SourceLocator {
    /// Returns the text of the referenced function definition.
    ///
    /// # Errors
    /// Returns an error if the function cannot be found or read.
    fn source_of(&self, function: &FunctionRef) -> Result<String>;
}

/// Locates functions in Python files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLocator {
    parser: PythonParser,
}

impl FileLocator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parser: PythonParser::new(),
        }
    }

    fn read_module(path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(Error::from)
    }
}

impl SourceLocator for FileLocator {
    fn source_of(&self, function: &FunctionRef) -> Result<String> {
        let module = function
            .module
            .as_deref()
            .ok_or_else(|| Error::Locate(format!("`{}` names no module file", function.name)))?;

        let source = Self::read_module(module)?;
        tracing::debug!(%function, "reading function source from file");
        extract_function(&self.parser, &source, function)
    }
}

/// Locates functions in a module held in memory.
#[derive(Debug, Clone, Default)]
pub struct InlineLocator {
    source: String,
    parser: PythonParser,
}

impl InlineLocator {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            parser: PythonParser::new(),
        }
    }
}

impl SourceLocator for InlineLocator {
    fn source_of(&self, function: &FunctionRef) -> Result<String> {
        extract_function(&self.parser, &self.source, function)
    }
}

/// Cuts the text of one top-level definition out of a module.
fn extract_function(
    parser: &dyn SourceParser,
    source: &str,
    function: &FunctionRef,
) -> Result<String> {
    let tree = parser.parse(source)?;
    tree.function(&function.name)
        .map(|node| node.text.clone())
        .ok_or_else(|| Error::Locate(format!("no top-level function `{function}`")))
}
