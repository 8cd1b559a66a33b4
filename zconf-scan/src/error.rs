//! Errors surfaced while driving a scan.

use std::path::PathBuf;

use thiserror::Error;
use zconf_primitives::ContextError;

/// Result alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors surfaced by the scan driver.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scanned module lives outside the configured package's directory.
    #[error(
        "cannot scan `{module}` from `{package}`: only modules in the same directory can be \
         scanned; sub-packages and separate packages must be configured with an include directive"
    )]
    CrossPackage {
        /// Dotted name of the module that was scanned.
        module: String,
        /// Dotted name of the configured package.
        package: String,
    },

    /// A file target cannot be resolved without a configured package.
    #[error("cannot derive a module for `{file}`: the registration context has no package")]
    PackageRequired {
        /// The file the scan was asked to process.
        file: PathBuf,
    },

    /// The module resolver does not know the requested name.
    #[error("module `{name}` is not known to the resolver")]
    ModuleNotFound {
        /// The dotted module name that failed to resolve.
        name: String,
    },

    /// A registration-context failure, propagated unchanged.
    #[error(transparent)]
    Context(#[from] ContextError),
}
