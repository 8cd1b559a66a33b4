//! Explicit module tokens.
//!
//! Callers pass their own module token to every declaration entry point
//! instead of having the adapter reconstruct it from a call stack.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Identifies a code module by its dotted name and its source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Module {
    name: String,
    file: PathBuf,
}

impl Module {
    /// Creates a module token from a dotted name and the file that defines it.
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }

    /// Returns the dotted module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the path of the file that defines this module.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Returns the directory containing the module's file.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.file.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Produces the dotted identifier of a member defined in this module.
    #[must_use]
    pub fn member(&self, name: &str) -> String {
        format!("{}.{name}", self.name)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
